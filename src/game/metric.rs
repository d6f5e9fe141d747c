//! Metric definitions and bounds.

use serde::{Deserialize, Serialize};

/// Lowest value a metric may hold.
pub const METRIC_MIN: i32 = 0;

/// Highest value a metric may hold.
pub const METRIC_MAX: i32 = 100;

/// Most negative effect a repaired scenario may carry.
pub const EFFECT_MIN: i32 = -15;

/// Most positive effect a repaired scenario may carry.
pub const EFFECT_MAX: i32 = 15;

/// At or below this value a metric triggers a low warning.
pub const WARNING_LOW: i32 = 10;

/// At or above this value a metric triggers a high warning.
pub const WARNING_HIGH: i32 = 90;

/// Identity of one tracked metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDef {
    /// Key used in effect maps and generated JSON (e.g. `public_trust`).
    pub key: String,
    /// Human-readable name (e.g. `Public Trust`).
    pub label: String,
}

impl MetricDef {
    /// Create a metric definition.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Clamp a raw metric value into `[METRIC_MIN, METRIC_MAX]`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn clamp_metric(value: i64) -> i32 {
    // In range after the clamp, so the cast is lossless.
    value.clamp(i64::from(METRIC_MIN), i64::from(METRIC_MAX)) as i32
}

/// Clamp a raw effect value into `[EFFECT_MIN, EFFECT_MAX]`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn clamp_effect(value: i64) -> i32 {
    value.clamp(i64::from(EFFECT_MIN), i64::from(EFFECT_MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_metric_bounds() {
        assert_eq!(clamp_metric(-5), 0);
        assert_eq!(clamp_metric(0), 0);
        assert_eq!(clamp_metric(65), 65);
        assert_eq!(clamp_metric(100), 100);
        assert_eq!(clamp_metric(i64::MAX), 100);
    }

    #[test]
    fn test_clamp_effect_bounds() {
        assert_eq!(clamp_effect(20), 15);
        assert_eq!(clamp_effect(-20), -15);
        assert_eq!(clamp_effect(7), 7);
    }
}
