//! Game state and effect application.
//!
//! State is never mutated in place by the turn loop. Each update returns a
//! new [`GameState`], so the applicator can be tested without any I/O.

use serde::{Deserialize, Serialize};

use crate::game::{Effects, MetricDef, clamp_metric};

/// Default number of turns in a run.
pub const DEFAULT_MAX_TURNS: u32 = 10;

/// Default starting value for every metric.
pub const DEFAULT_INITIAL_VALUE: i32 = 50;

/// How choices are made each turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// A person types `A` or `B`.
    #[default]
    Interactive,
    /// The generator (or a random pick) chooses.
    Automated,
}

/// A metric and its current value.
///
/// The value is kept in `[0, 100]` by every constructor and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    key: String,
    value: i32,
}

impl Metric {
    /// Create a metric, clamping the value into range.
    #[must_use]
    pub fn new(key: impl Into<String>, value: i32) -> Self {
        Self {
            key: key.into(),
            value: clamp_metric(i64::from(value)),
        }
    }

    /// Metric key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// This metric shifted by `delta`, clamped.
    #[must_use]
    fn shifted(&self, delta: i32) -> Self {
        Self {
            key: self.key.clone(),
            value: clamp_metric(i64::from(self.value) + i64::from(delta)),
        }
    }
}

/// Complete state of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    metrics: Vec<Metric>,
    /// Current turn number (1-indexed).
    pub turn: u32,
    /// Turn limit.
    pub max_turns: u32,
    /// How choices are made.
    pub mode: Mode,
}

impl GameState {
    /// Create a state with every metric at `initial`.
    #[must_use]
    pub fn new(defs: &[MetricDef], initial: i32, max_turns: u32, mode: Mode) -> Self {
        Self {
            metrics: defs.iter().map(|def| Metric::new(def.key.clone(), initial)).collect(),
            turn: 1,
            max_turns,
            mode,
        }
    }

    /// Create a state from explicit metric values, in order.
    #[must_use]
    pub fn from_values<K: Into<String>>(
        values: impl IntoIterator<Item = (K, i32)>,
        max_turns: u32,
        mode: Mode,
    ) -> Self {
        Self {
            metrics: values.into_iter().map(|(key, value)| Metric::new(key, value)).collect(),
            turn: 1,
            max_turns,
            mode,
        }
    }

    /// All metrics in definition order.
    #[must_use]
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Value of a metric by key.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<i32> {
        self.metrics.iter().find(|m| m.key == key).map(Metric::value)
    }

    /// Mean of all metric values. Zero when there are no metrics.
    #[must_use]
    pub fn average(&self) -> f64 {
        if self.metrics.is_empty() {
            return 0.0;
        }
        let total: i32 = self.metrics.iter().map(Metric::value).sum();
        f64::from(total) / f64::from(u32::try_from(self.metrics.len()).unwrap_or(u32::MAX))
    }

    /// Whether the turn counter has passed the limit.
    #[must_use]
    pub const fn turns_exhausted(&self) -> bool {
        self.turn > self.max_turns
    }

    /// Apply a choice's effects, returning the new state.
    ///
    /// Every metric reads its delta from `effects` (zero when absent), adds
    /// it, and clamps to `[0, 100]` independently of the others. Keys in
    /// `effects` that name no metric are ignored.
    #[must_use]
    pub fn apply_effects(&self, effects: &Effects) -> Self {
        Self {
            metrics: self
                .metrics
                .iter()
                .map(|m| m.shifted(effects.get(&m.key).copied().unwrap_or(0)))
                .collect(),
            ..self.clone()
        }
    }

    /// The same state on the following turn.
    #[must_use]
    pub fn next_turn(&self) -> Self {
        Self {
            turn: self.turn.saturating_add(1),
            ..self.clone()
        }
    }
}
