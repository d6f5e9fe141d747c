//! Game model for the decision engine.
//!
//! - Bounded metrics and their clamping rules
//! - Immutable game state and effect application
//! - Scenarios and boundary validation of generated ones
//! - Termination checks, warnings and the final assessment

mod assessment;
mod metric;
mod scenario;
mod state;

pub use assessment::{
    MetricWarning, Thresholds, Tier, WarningKind, assess, breached_metric, is_game_over,
    metric_warnings,
};
pub use metric::{
    EFFECT_MAX, EFFECT_MIN, METRIC_MAX, METRIC_MIN, MetricDef, WARNING_HIGH, WARNING_LOW,
    clamp_effect, clamp_metric,
};
pub use scenario::{
    Choice, Choices, Effects, Label, Scenario, ValidationPolicy, parse_scenario,
    validate_and_fix_event,
};
pub use state::{DEFAULT_INITIAL_VALUE, DEFAULT_MAX_TURNS, GameState, Metric, Mode};
