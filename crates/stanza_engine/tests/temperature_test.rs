//! Tests for round-based temperature escalation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use stanza_engine::TemperatureScheduler;

#[test]
fn test_first_round_range() {
    let scheduler = TemperatureScheduler::new();
    let mut rng = StdRng::seed_from_u64(5);

    let temps = scheduler.temperatures_for_round(0, 500, &mut rng);
    assert_eq!(temps.len(), 500);
    assert!(temps.iter().all(|t| (0.1..=1.5).contains(t)));
    assert_eq!(scheduler.range_for_round(0), 0.1..=1.5);
}

#[test]
fn test_retry_rounds_escalate() {
    let scheduler = TemperatureScheduler::new();
    let mut rng = StdRng::seed_from_u64(17);

    for round in 1..10 {
        let low = 0.5 + 0.2 * round as f64;
        let high = 1.5 + 0.2 * round as f64;
        let range = scheduler.range_for_round(round);
        assert!((range.start() - low).abs() < 1e-12);
        assert!((range.end() - high).abs() < 1e-12);

        for t in scheduler.temperatures_for_round(round, 200, &mut rng) {
            assert!(
                t >= low && t <= high,
                "round {} temperature {} outside [{}, {}]",
                round,
                t,
                low,
                high
            );
        }
    }
}

#[test]
fn test_round_ranges_move_upward() {
    let scheduler = TemperatureScheduler::new();
    let mut previous = scheduler.range_for_round(1);
    for round in 2..8 {
        let current = scheduler.range_for_round(round);
        assert!(current.start() > previous.start());
        assert!(current.end() > previous.end());
        previous = current;
    }
}

#[test]
fn test_zero_count_draws_nothing() {
    let scheduler = TemperatureScheduler::new();
    let mut rng = StdRng::seed_from_u64(1);
    assert!(scheduler.temperatures_for_round(3, 0, &mut rng).is_empty());
}

#[test]
fn test_seeded_draws_are_reproducible() {
    let scheduler = TemperatureScheduler::new();
    let a = scheduler.temperatures_for_round(2, 5, &mut StdRng::seed_from_u64(99));
    let b = scheduler.temperatures_for_round(2, 5, &mut StdRng::seed_from_u64(99));
    assert_eq!(a, b);
}
