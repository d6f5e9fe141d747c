//! Scenarios, choices, and validation at the generator boundary.
//!
//! Generated text is never trusted past [`parse_scenario`]. The raw
//! response is reduced to a JSON object, checked for the required shape,
//! and then either repaired or rejected depending on the game's
//! [`ValidationPolicy`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ScenarioError;
use crate::game::{MetricDef, clamp_effect};

/// One of the two options offered each turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Label {
    /// The first option.
    A,
    /// The second option.
    B,
}

impl Label {
    /// Both labels in display order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// The label as a one-letter string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }

    /// Parse a label typed by a person: whitespace-trimmed, case-insensitive.
    #[must_use]
    pub fn parse_input(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            _ => None,
        }
    }

    /// Parse a label returned by the generator.
    ///
    /// Only a bare `A` or `B` (after trimming) is accepted.
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        match token.trim() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metric key to signed delta.
pub type Effects = BTreeMap<String, i32>;

/// A labeled option with its stated effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// What the option does.
    pub text: String,
    /// Why the option has these effects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Per-metric deltas. Missing metrics count as zero.
    #[serde(default)]
    pub effects: Effects,
}

impl Choice {
    /// Delta for a metric, zero when absent.
    #[must_use]
    pub fn effect(&self, key: &str) -> i32 {
        self.effects.get(key).copied().unwrap_or(0)
    }
}

/// The pair of options in a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choices {
    /// Option A.
    #[serde(rename = "A")]
    pub a: Choice,
    /// Option B.
    #[serde(rename = "B")]
    pub b: Choice,
}

/// A situation presented to the player on one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Main scenario text.
    pub description: String,
    /// Background information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// The two options.
    pub choices: Choices,
}

impl Scenario {
    /// Get the choice for a label.
    #[must_use]
    pub fn choice(&self, label: Label) -> &Choice {
        match label {
            Label::A => &self.choices.a,
            Label::B => &self.choices.b,
        }
    }

    /// Iterate over `(label, choice)` in display order.
    pub fn iter_choices(&self) -> impl Iterator<Item = (Label, &Choice)> {
        Label::ALL.into_iter().map(move |label| (label, self.choice(label)))
    }
}

/// How effect values in generated scenarios are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationPolicy {
    /// Coerce numeric-like values to integers and clamp to the effect range.
    #[default]
    Repair,
    /// Require integer values and take them as given; anything else
    /// discards the scenario.
    Reject,
}

/// Parse and validate a raw generator response into a [`Scenario`].
///
/// The response may be wrapped in code fences or surrounded by prose.
/// Only effects for `metrics` are kept.
///
/// # Errors
///
/// Returns a [`ScenarioError`] if no JSON object can be read, a required
/// key is missing, or an effect value is unacceptable under `policy`.
pub fn parse_scenario(
    raw: &str,
    metrics: &[MetricDef],
    policy: ValidationPolicy,
) -> Result<Scenario, ScenarioError> {
    let mut event = extract_json(raw)?;
    match policy {
        ValidationPolicy::Repair => validate_and_fix_event(&mut event, metrics)?,
        ValidationPolicy::Reject => check_structure(&event, metrics)?,
    }
    scenario_from_value(&event, metrics)
}

/// Check the event shape and repair its effect values in place.
///
/// Every effect for a known metric is coerced to an integer (numbers are
/// truncated, numeric strings parsed) and clamped to `[-15, 15]`.
///
/// # Errors
///
/// Returns a [`ScenarioError`] for a missing key or choice, or an effect
/// value that cannot be read as a number.
pub fn validate_and_fix_event(event: &mut Value, metrics: &[MetricDef]) -> Result<(), ScenarioError> {
    check_structure(event, metrics)?;

    for label in Label::ALL {
        let Some(effects) = event
            .pointer_mut(&format!("/choices/{label}/effects"))
            .and_then(Value::as_object_mut)
        else {
            return Err(ScenarioError::NotAnObject(format!("choices.{label}.effects")));
        };

        for metric in metrics {
            if let Some(entry) = effects.get_mut(&metric.key) {
                let raw = coerce_effect(entry).map_err(|reason| ScenarioError::InvalidEffect {
                    choice: label,
                    metric: metric.key.clone(),
                    reason,
                })?;
                *entry = Value::from(clamp_effect(raw));
            }
        }
    }

    Ok(())
}

/// Reduce a raw response to a JSON value.
fn extract_json(raw: &str) -> Result<Value, ScenarioError> {
    let cleaned = strip_fences(raw);
    if let Ok(value) = serde_json::from_str::<Value>(&cleaned) {
        return Ok(value);
    }

    // First complete object from the first brace; trailing prose is ignored
    let start = cleaned.find('{').ok_or(ScenarioError::NoJsonObject)?;
    serde_json::Deserializer::from_str(&cleaned[start..])
        .into_iter::<Value>()
        .next()
        .ok_or(ScenarioError::NoJsonObject)?
        .map_err(|e| ScenarioError::InvalidJson(e.to_string()))
}

/// Remove a surrounding Markdown code fence, if any.
fn strip_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    trimmed
        .lines()
        .skip(1)
        .take_while(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Presence checks shared by both policies.
fn check_structure(event: &Value, metrics: &[MetricDef]) -> Result<(), ScenarioError> {
    let root = as_object(event, "scenario")?;
    for key in ["description", "context", "choices"] {
        require(root, "scenario", key)?;
    }

    let choices = as_object(require(root, "scenario", "choices")?, "choices")?;
    for label in Label::ALL {
        let path = format!("choices.{label}");
        let choice = choices
            .get(label.as_str())
            .ok_or(ScenarioError::MissingChoice(label))?;
        let choice = as_object(choice, &path)?;
        for key in ["text", "effects", "reasoning"] {
            require(choice, &path, key)?;
        }

        let effects_path = format!("{path}.effects");
        let effects = as_object(require(choice, &path, "effects")?, &effects_path)?;
        for metric in metrics {
            require(effects, &effects_path, &metric.key)?;
        }
    }

    Ok(())
}

/// Build the typed scenario from a checked event.
fn scenario_from_value(event: &Value, metrics: &[MetricDef]) -> Result<Scenario, ScenarioError> {
    let root = as_object(event, "scenario")?;
    let choices = as_object(require(root, "scenario", "choices")?, "choices")?;

    let choice = |label: Label| -> Result<Choice, ScenarioError> {
        let path = format!("choices.{label}");
        let obj = as_object(
            choices.get(label.as_str()).ok_or(ScenarioError::MissingChoice(label))?,
            &path,
        )?;
        let effects_path = format!("{path}.effects");
        let raw_effects = as_object(require(obj, &path, "effects")?, &effects_path)?;

        let mut effects = Effects::new();
        for metric in metrics {
            let value = require(raw_effects, &effects_path, &metric.key)?;
            let delta = value
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .ok_or_else(|| ScenarioError::InvalidEffect {
                    choice: label,
                    metric: metric.key.clone(),
                    reason: format!("must be an integer (got {value})"),
                })?;
            effects.insert(metric.key.clone(), delta);
        }

        Ok(Choice {
            text: text(obj, &path, "text")?,
            effects,
            reasoning: Some(text(obj, &path, "reasoning")?),
        })
    };

    Ok(Scenario {
        description: text(root, "scenario", "description")?,
        context: Some(text(root, "scenario", "context")?),
        choices: Choices {
            a: choice(Label::A)?,
            b: choice(Label::B)?,
        },
    })
}

fn as_object<'v>(value: &'v Value, path: &str) -> Result<&'v Map<String, Value>, ScenarioError> {
    value
        .as_object()
        .ok_or_else(|| ScenarioError::NotAnObject(path.to_string()))
}

fn require<'v>(
    obj: &'v Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'v Value, ScenarioError> {
    obj.get(key).ok_or_else(|| ScenarioError::MissingKey {
        path: path.to_string(),
        key: key.to_string(),
    })
}

fn text(obj: &Map<String, Value>, path: &str, key: &str) -> Result<String, ScenarioError> {
    require(obj, path, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ScenarioError::NotAString(format!("{path}.{key}")))
}

/// Coerce a numeric-like JSON value to an integer.
#[allow(clippy::cast_possible_truncation)]
fn coerce_effect(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(v)
            } else if n.is_u64() {
                Ok(i64::MAX)
            } else {
                // JSON numbers are always finite; `as` truncates toward zero.
                n.as_f64()
                    .map(|f| f.trunc() as i64)
                    .ok_or_else(|| format!("`{n}` is not a number"))
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("`{s}` is not an integer")),
        other => Err(format!("`{other}` is not numeric")),
    }
}
