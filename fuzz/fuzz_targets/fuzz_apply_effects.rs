#![no_main]

use arbitrary::Arbitrary;
use dilemma::game::{
    Effects, GameState, METRIC_MAX, METRIC_MIN, Mode, Thresholds, assess, breached_metric,
    metric_warnings,
};
use libfuzzer_sys::fuzz_target;

/// Structured input for applicator fuzzing.
#[derive(Arbitrary, Debug)]
struct ApplyInput {
    /// Starting values (clamped on construction).
    initial: [i32; 3],
    /// Deltas applied on successive turns.
    turns: Vec<[i32; 3]>,
}

const KEYS: [&str; 3] = ["secrecy", "influence", "funds"];

fuzz_target!(|input: ApplyInput| {
    let mut state = GameState::from_values(KEYS.into_iter().zip(input.initial), 10, Mode::Automated);

    for deltas in input.turns.iter().take(64) {
        let effects: Effects = KEYS.into_iter().map(str::to_string).zip(*deltas).collect();
        let next = state.apply_effects(&effects);

        for metric in next.metrics() {
            assert!((METRIC_MIN..=METRIC_MAX).contains(&metric.value()));
        }
        assert_eq!(next.turn, state.turn);

        // A breached metric is always also a warning
        if let Some(metric) = breached_metric(&next) {
            assert!(metric_warnings(&next).iter().any(|w| w.key == metric.key()));
        }

        let average = next.average();
        assert!((0.0..=100.0).contains(&average));
        let _ = assess(average, Thresholds::default());

        state = next.next_turn();
    }
});
