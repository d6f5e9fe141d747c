//! End-of-turn and end-of-game evaluation.

use serde::{Deserialize, Serialize};

use crate::game::{GameState, METRIC_MAX, METRIC_MIN, Metric, WARNING_HIGH, WARNING_LOW};

/// Average-score cut-offs for the final assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Averages at or above this earn the best outcome.
    pub best: f64,
    /// Averages at or above this (and below `best`) earn the middling outcome.
    pub middling: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            best: 75.0,
            middling: 50.0,
        }
    }
}

/// Final assessment tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Average reached the best threshold.
    Best,
    /// Average reached the middling threshold.
    Middling,
    /// Average fell short of both.
    Worst,
}

/// Direction of a metric warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// At or below the low warning line.
    Low,
    /// At or above the high warning line.
    High,
}

/// A metric close to one of its bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricWarning {
    /// Key of the metric.
    pub key: String,
    /// Its value.
    pub value: i32,
    /// Which bound it is near.
    pub kind: WarningKind,
}

/// Whether any metric has hit a bound.
///
/// Only games that end on a breach consult this.
#[must_use]
pub fn is_game_over(state: &GameState) -> bool {
    breached_metric(state).is_some()
}

/// The first metric sitting at or beyond a bound, if any.
#[must_use]
pub fn breached_metric(state: &GameState) -> Option<&Metric> {
    state
        .metrics()
        .iter()
        .find(|m| m.value() <= METRIC_MIN || m.value() >= METRIC_MAX)
}

/// Every metric inside a warning band.
///
/// Independent of [`is_game_over`]: a breached metric also warns.
#[must_use]
pub fn metric_warnings(state: &GameState) -> Vec<MetricWarning> {
    state
        .metrics()
        .iter()
        .filter_map(|m| {
            let kind = if m.value() <= WARNING_LOW {
                WarningKind::Low
            } else if m.value() >= WARNING_HIGH {
                WarningKind::High
            } else {
                return None;
            };
            Some(MetricWarning {
                key: m.key().to_string(),
                value: m.value(),
                kind,
            })
        })
        .collect()
}

/// Tier for a final average.
#[must_use]
pub fn assess(average: f64, thresholds: Thresholds) -> Tier {
    if average >= thresholds.best {
        Tier::Best
    } else if average >= thresholds.middling {
        Tier::Middling
    } else {
        Tier::Worst
    }
}
