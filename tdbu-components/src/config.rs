//! Card configuration.
//!
//! Configuration arrives as loosely typed JSON. Only the two entity ids are
//! mandatory; every other field falls back to a default when it is absent or
//! has the wrong shape.
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::position::UnavailablePolicy;

/// Card type string registered with the dashboard.
pub const CARD_TYPE: &str = "custom:ha-tdbu-widget";

/// Errors produced while reading a card configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required entity id is absent, empty or not a string.
    #[error("top_entity and bottom_entity are required (missing `{field}`)")]
    MissingEntity {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The configuration is not a JSON object or not valid JSON.
    #[error("invalid card configuration: {0}")]
    InvalidShape(#[source] serde_json::Error),
}

/// What tapping the card body does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TapAction {
    /// Open the details dialog.
    #[default]
    Details,
    /// Ask the host to show its entity details view.
    MoreInfo,
    /// Do nothing.
    None,
}

impl TapAction {
    /// Parses a config string. Unrecognized values open the details dialog.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "more-info" => TapAction::MoreInfo,
            "none" => TapAction::None,
            _ => TapAction::Details,
        }
    }
}

/// Normalized card configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CardConfig {
    /// Title override.
    pub name: Option<String>,
    /// Entity driving the top rail.
    pub top_entity: String,
    /// Entity driving the bottom rail.
    pub bottom_entity: String,
    /// Show the per-rail percentage rows.
    pub show_positions: bool,
    /// Card tap behavior.
    pub tap_action: TapAction,
    /// Entity for [`TapAction::MoreInfo`]; the top entity when unset.
    pub tap_entity: Option<String>,
    /// Keyboard step, always positive.
    pub step: f32,
    /// Minimum rail separation, never negative.
    pub min_gap: f32,
    /// Whether the `unknown` state disables the controls.
    pub unknown_disables: bool,
}

// Every field is read as a raw value so that a wrong type degrades to the
// default instead of failing the whole config.
#[derive(Debug, Default, Deserialize)]
struct RawCardConfig {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    top_entity: Option<Value>,
    #[serde(default)]
    bottom_entity: Option<Value>,
    #[serde(default)]
    show_positions: Option<Value>,
    #[serde(default)]
    tap_action: Option<Value>,
    #[serde(default)]
    tap_entity: Option<Value>,
    #[serde(default)]
    step: Option<Value>,
    #[serde(default)]
    min_gap: Option<Value>,
    #[serde(default)]
    unknown_disables: Option<Value>,
}

fn non_empty_string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

fn number(value: Option<&Value>) -> Option<f32> {
    value
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .filter(|v| v.is_finite())
}

impl CardConfig {
    /// Reads a configuration from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let raw: RawCardConfig =
            serde_json::from_value(value).map_err(ConfigError::InvalidShape)?;

        let top_entity = non_empty_string(raw.top_entity).ok_or(ConfigError::MissingEntity {
            field: "top_entity",
        })?;
        let bottom_entity =
            non_empty_string(raw.bottom_entity).ok_or(ConfigError::MissingEntity {
                field: "bottom_entity",
            })?;

        let tap_action = match raw.tap_action {
            Some(Value::String(s)) => TapAction::parse(&s),
            _ => TapAction::default(),
        };

        Ok(Self {
            name: non_empty_string(raw.name),
            top_entity,
            bottom_entity,
            show_positions: !matches!(raw.show_positions, Some(Value::Bool(false))),
            tap_action,
            tap_entity: non_empty_string(raw.tap_entity),
            step: number(raw.step.as_ref()).filter(|v| *v > 0.0).unwrap_or(1.0),
            min_gap: number(raw.min_gap.as_ref())
                .filter(|v| *v >= 0.0)
                .unwrap_or(0.0),
            unknown_disables: !matches!(raw.unknown_disables, Some(Value::Bool(false))),
        })
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json).map_err(ConfigError::InvalidShape)?;
        Self::from_value(value)
    }

    /// Entity targeted by the more-info tap action.
    pub fn more_info_entity(&self) -> &str {
        self.tap_entity.as_deref().unwrap_or(&self.top_entity)
    }

    /// Disabled-state policy implied by this configuration.
    pub fn unavailable_policy(&self) -> UnavailablePolicy {
        UnavailablePolicy {
            unknown_disables: self.unknown_disables,
        }
    }
}

/// Example configuration offered when the card is first added.
pub fn stub_config() -> Value {
    serde_json::json!({
        "type": CARD_TYPE,
        "top_entity": "cover.top_rail",
        "bottom_entity": "cover.bottom_rail",
        "name": "TDBU blind",
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = CardConfig::from_value(json!({
            "top_entity": "cover.a",
            "bottom_entity": "cover.b",
        }))
        .expect("config is valid");
        assert_eq!(config.name, None);
        assert!(config.show_positions);
        assert_eq!(config.tap_action, TapAction::Details);
        assert_eq!(config.step, 1.0);
        assert_eq!(config.min_gap, 0.0);
        assert!(config.unknown_disables);
        assert_eq!(config.more_info_entity(), "cover.a");
    }

    #[test]
    fn entities_are_required() {
        let err = CardConfig::from_value(json!({ "top_entity": "cover.a" }))
            .expect_err("config must be rejected");
        assert!(matches!(
            err,
            ConfigError::MissingEntity {
                field: "bottom_entity"
            }
        ));

        let err = CardConfig::from_value(json!({ "top_entity": "", "bottom_entity": "cover.b" }))
            .expect_err("config must be rejected");
        assert!(err.to_string().contains("top_entity"));

        let err = CardConfig::from_value(json!({ "top_entity": 3, "bottom_entity": "cover.b" }))
            .expect_err("config must be rejected");
        assert!(matches!(err, ConfigError::MissingEntity { .. }));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(matches!(
            CardConfig::from_value(json!("cover.a")),
            Err(ConfigError::InvalidShape(_))
        ));
        assert!(matches!(
            CardConfig::from_json_str("{ nope"),
            Err(ConfigError::InvalidShape(_))
        ));
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = CardConfig::from_value(json!({
            "top_entity": "cover.a",
            "bottom_entity": "cover.b",
            "step": "5",
            "min_gap": -2,
        }))
        .expect("config is valid");
        assert_eq!(config.step, 1.0);
        assert_eq!(config.min_gap, 0.0);

        let config = CardConfig::from_value(json!({
            "top_entity": "cover.a",
            "bottom_entity": "cover.b",
            "step": 0,
            "min_gap": 7.5,
        }))
        .expect("config is valid");
        assert_eq!(config.step, 1.0);
        assert_eq!(config.min_gap, 7.5);
    }

    #[test]
    fn full_config_from_json_text() {
        let config = CardConfig::from_json_str(
            r#"{
                "type": "custom:ha-tdbu-widget",
                "name": "Office",
                "top_entity": "cover.office_top",
                "bottom_entity": "cover.office_bottom",
                "show_positions": false,
                "tap_action": "more-info",
                "tap_entity": "cover.office_group",
                "step": 5,
                "min_gap": 10,
                "unknown_disables": false
            }"#,
        )
        .expect("config is valid");
        assert_eq!(config.name.as_deref(), Some("Office"));
        assert!(!config.show_positions);
        assert_eq!(config.tap_action, TapAction::MoreInfo);
        assert_eq!(config.more_info_entity(), "cover.office_group");
        assert_eq!(config.step, 5.0);
        assert_eq!(config.min_gap, 10.0);
        assert!(!config.unavailable_policy().unknown_disables);
    }

    #[test]
    fn tap_action_parsing() {
        assert_eq!(TapAction::parse("none"), TapAction::None);
        assert_eq!(TapAction::parse("more-info"), TapAction::MoreInfo);
        assert_eq!(TapAction::parse("details"), TapAction::Details);
        assert_eq!(TapAction::parse("toggle"), TapAction::Details);
    }

    #[test]
    fn stub_config_is_valid() {
        let config = CardConfig::from_value(stub_config()).expect("config is valid");
        assert_eq!(config.top_entity, "cover.top_rail");
        assert_eq!(config.bottom_entity, "cover.bottom_rail");
        assert_eq!(config.name.as_deref(), Some("TDBU blind"));
    }
}
