//! Sampling temperatures that escalate across rounds.

use rand::Rng;
use std::ops::RangeInclusive;

const FIRST_ROUND: RangeInclusive<f64> = 0.1..=1.5;
const RETRY_LOW: f64 = 0.5;
const RETRY_HIGH: f64 = 1.5;
const RETRY_STEP: f64 = 0.2;

/// Draws temperatures for each generation round.
///
/// Round 0 draws from `[0.1, 1.5]`; round `r > 0` from
/// `[0.5 + 0.2r, 1.5 + 0.2r]`, so retries after duplicate-heavy rounds sample
/// hotter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemperatureScheduler;

impl TemperatureScheduler {
    /// Creates a scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Inclusive bounds for temperatures in `round`.
    pub fn range_for_round(&self, round: usize) -> RangeInclusive<f64> {
        if round == 0 {
            return FIRST_ROUND;
        }
        let shift = RETRY_STEP * round as f64;
        (RETRY_LOW + shift)..=(RETRY_HIGH + shift)
    }

    /// Draws `count` independent temperatures for `round`.
    pub fn temperatures_for_round<R: Rng>(
        &self,
        round: usize,
        count: usize,
        rng: &mut R,
    ) -> Vec<f64> {
        let range = self.range_for_round(round);
        (0..count).map(|_| rng.gen_range(range.clone())).collect()
    }
}
