//! Randomized context windows for completion prompts.

use rand::Rng;

/// Chooses how much of the poem each attempt sees.
///
/// Varying the window between attempts pushes the backend toward different
/// continuations. Truncation always keeps the most recent lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextSampler {
    truncation_probability: f64,
    max_context_lines: usize,
}

const DEFAULT_TRUNCATION_PROBABILITY: f64 = 0.7;

impl Default for ContextSampler {
    fn default() -> Self {
        Self::new(DEFAULT_TRUNCATION_PROBABILITY, 3)
    }
}

impl ContextSampler {
    /// Creates a sampler.
    ///
    /// `truncation_probability` is clamped into `[0, 1]`, with NaN replaced by
    /// the default of 0.7, and `max_context_lines` is raised to at least 1.
    pub fn new(truncation_probability: f64, max_context_lines: usize) -> Self {
        let truncation_probability = if truncation_probability.is_nan() {
            DEFAULT_TRUNCATION_PROBABILITY
        } else {
            truncation_probability.clamp(0.0, 1.0)
        };
        Self {
            truncation_probability,
            max_context_lines: max_context_lines.max(1),
        }
    }

    /// Returns the prompt text for one attempt.
    ///
    /// With the configured probability keeps only the last `k` lines, `k`
    /// uniform in `1..=min(max_context_lines, total_lines)`. Text with at most
    /// one line is always returned unchanged.
    pub fn sample<R: Rng>(&self, current_text: &str, rng: &mut R) -> String {
        let lines: Vec<&str> = current_text.lines().collect();
        if lines.len() <= 1 || !rng.gen_bool(self.truncation_probability) {
            return current_text.to_string();
        }

        let upper = self.max_context_lines.min(lines.len());
        let keep = rng.gen_range(1..=upper);
        lines[lines.len() - keep..].join("\n")
    }
}
