//! Filename-safe slugs.

/// Transliterates `text` to ASCII and joins its lowercase alphanumeric runs with `-`.
///
/// Apostrophes are dropped rather than treated as separators, so contractions
/// stay whole.
///
/// # Examples
///
/// ```
/// use stanza_storage::slugify;
///
/// assert_eq!(slugify("The Sun Sets, Slow!"), "the-sun-sets-slow");
/// assert_eq!(slugify("Don't stop"), "dont-stop");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text).replace(['\'', '"'], "");
    slug::slugify(ascii)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_clean(slug: &str) -> bool {
        !slug.starts_with('-')
            && !slug.ends_with('-')
            && !slug.contains("--")
            && slug
                .chars()
                .all(|c| c == '-' || c.is_ascii_lowercase() || c.is_ascii_digit())
    }

    #[test]
    fn test_collapses_separators() {
        assert_eq!(slugify("  a -- b\t\tc  "), "a-b-c");
    }

    #[test]
    fn test_transliterates_accents() {
        assert_eq!(slugify("Café au lait"), "cafe-au-lait");
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
    }

    #[test]
    fn test_strips_apostrophes() {
        assert_eq!(slugify("Don't stop"), "dont-stop");
        assert_eq!(slugify("Don’t stop"), "dont-stop");
    }

    #[test]
    fn test_transliterates_cyrillic() {
        let slug = slugify("Я помню чудное мгновенье");
        assert!(!slug.is_empty());
        assert!(is_clean(&slug), "unexpected slug {:?}", slug);
        assert!(slug.contains("pomn"), "unexpected slug {:?}", slug);
        assert_eq!(slug.split('-').count(), 4);
    }

    #[test]
    fn test_empty_when_nothing_usable() {
        assert_eq!(slugify("!?"), "");
    }
}
