//! Read-only view of the external entity store.
//!
//! The host owns a key-value store of named entities, each carrying a state
//! string and a bag of attributes. Controls only ever read from it through
//! [`EntityStore`]; a missing store, a missing entity and an empty entity id
//! all read as `None`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// State string for a fully open cover.
pub const STATE_OPEN: &str = "open";
/// State string for a fully closed cover.
pub const STATE_CLOSED: &str = "closed";
/// State string reported when the integration cannot reach the device.
pub const STATE_UNAVAILABLE: &str = "unavailable";
/// State string reported before the first update arrives.
pub const STATE_UNKNOWN: &str = "unknown";

/// A snapshot of one entity at the time it was read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Raw state string, e.g. `"open"`, `"closed"`, `"opening"`.
    #[serde(default)]
    pub state: String,
    /// Typed attributes.
    #[serde(default)]
    pub attributes: EntityAttributes,
    /// When the state string last changed.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_changed: Option<DateTime<Utc>>,
}

/// Attributes the controls read. Anything else is kept in `other`.
///
/// Numeric fields that are present but not finite numbers read as absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityAttributes {
    /// Preferred position source, 0-100.
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_position: Option<f32>,
    /// Fallback position source, 0-100.
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<f32>,
    /// Human readable name.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub friendly_name: Option<String>,
    /// Remaining attributes, untouched.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl EntitySnapshot {
    /// A snapshot with the given state and no attributes.
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            ..Default::default()
        }
    }

    /// Sets `current_position`.
    #[must_use]
    pub fn with_current_position(mut self, position: f32) -> Self {
        self.attributes.current_position = Some(position);
        self
    }

    /// Sets the fallback `position` attribute.
    #[must_use]
    pub fn with_position(mut self, position: f32) -> Self {
        self.attributes.position = Some(position);
        self
    }

    /// Sets `friendly_name`.
    #[must_use]
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.attributes.friendly_name = Some(name.into());
        self
    }

    /// Sets `last_changed`.
    #[must_use]
    pub fn with_last_changed(mut self, at: DateTime<Utc>) -> Self {
        self.last_changed = Some(at);
        self
    }

    /// Returns true when the state string equals `state`.
    pub fn is_state(&self, state: &str) -> bool {
        self.state == state
    }
}

/// Read access to named entities.
pub trait EntityStore {
    /// Looks up an entity by id.
    fn entity(&self, entity_id: &str) -> Option<&EntitySnapshot>;
}

impl EntityStore for HashMap<String, EntitySnapshot> {
    fn entity(&self, entity_id: &str) -> Option<&EntitySnapshot> {
        self.get(entity_id)
    }
}

impl<S: EntityStore + ?Sized> EntityStore for &S {
    fn entity(&self, entity_id: &str) -> Option<&EntitySnapshot> {
        (**self).entity(entity_id)
    }
}

/// An absent store reads every entity as missing.
impl<S: EntityStore> EntityStore for Option<S> {
    fn entity(&self, entity_id: &str) -> Option<&EntitySnapshot> {
        self.as_ref()?.entity(entity_id)
    }
}

/// Looks up `entity_id`, treating an empty id as missing.
pub fn entity_state<'a, S>(store: &'a S, entity_id: &str) -> Option<&'a EntitySnapshot>
where
    S: EntityStore + ?Sized,
{
    if entity_id.is_empty() {
        return None;
    }
    store.entity(entity_id)
}

/// An owned in-memory store, deserializable from a JSON object keyed by
/// entity id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityStates {
    entities: HashMap<String, EntitySnapshot>,
}

impl EntityStates {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object of `{ entity_id: snapshot }`.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Inserts or replaces an entity, returning the previous snapshot.
    pub fn insert(
        &mut self,
        entity_id: impl Into<String>,
        snapshot: EntitySnapshot,
    ) -> Option<EntitySnapshot> {
        self.entities.insert(entity_id.into(), snapshot)
    }

    /// Removes an entity.
    pub fn remove(&mut self, entity_id: &str) -> Option<EntitySnapshot> {
        self.entities.remove(entity_id)
    }

    /// Mutable access to an entity.
    pub fn get_mut(&mut self, entity_id: &str) -> Option<&mut EntitySnapshot> {
        self.entities.get_mut(entity_id)
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the store holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityStore for EntityStates {
    fn entity(&self, entity_id: &str) -> Option<&EntitySnapshot> {
        self.entities.get(entity_id)
    }
}

impl FromIterator<(String, EntitySnapshot)> for EntityStates {
    fn from_iter<I: IntoIterator<Item = (String, EntitySnapshot)>>(iter: I) -> Self {
        Self {
            entities: iter.into_iter().collect(),
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .map(|v| v as f32)
        .filter(|v| v.is_finite()))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|at| at.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES_JSON: &str = r#"{
        "cover.top_rail": {
            "state": "open",
            "attributes": {
                "current_position": 35,
                "friendly_name": "Living room top",
                "supported_features": 15
            },
            "last_changed": "2024-05-01T10:15:00+00:00"
        },
        "cover.bottom_rail": {
            "state": "closed",
            "attributes": { "current_position": "n/a", "position": 12.5 }
        }
    }"#;

    #[test]
    fn parses_home_assistant_style_states() {
        let states = EntityStates::from_json_str(STATES_JSON).expect("valid states");
        assert_eq!(states.len(), 2);

        let top = states.entity("cover.top_rail").expect("top present");
        assert!(top.is_state(STATE_OPEN));
        assert_eq!(top.attributes.current_position, Some(35.0));
        assert_eq!(top.attributes.friendly_name.as_deref(), Some("Living room top"));
        assert_eq!(
            top.attributes.other.get("supported_features"),
            Some(&serde_json::json!(15))
        );
        assert!(top.last_changed.is_some());

        let bottom = states.entity("cover.bottom_rail").expect("bottom present");
        assert_eq!(bottom.attributes.current_position, None);
        assert_eq!(bottom.attributes.position, Some(12.5));
        assert_eq!(bottom.last_changed, None);
    }

    #[test]
    fn malformed_timestamp_reads_as_absent() {
        let snapshot: EntitySnapshot =
            serde_json::from_str(r#"{"state":"open","last_changed":"yesterday"}"#)
                .expect("lenient");
        assert_eq!(snapshot.last_changed, None);
    }

    #[test]
    fn missing_store_and_empty_id_read_as_none() {
        let mut states = EntityStates::new();
        states.insert("cover.a", EntitySnapshot::new(STATE_CLOSED));

        let missing: Option<&EntityStates> = None;
        assert!(entity_state(&missing, "cover.a").is_none());
        assert!(entity_state(&Some(&states), "cover.a").is_some());
        assert!(entity_state(&states, "").is_none());
        assert!(entity_state(&states, "cover.b").is_none());
    }

    #[test]
    fn hash_map_is_a_store() {
        let mut map = HashMap::new();
        map.insert(
            "cover.a".to_string(),
            EntitySnapshot::new(STATE_OPEN).with_position(80.0),
        );
        let snapshot = entity_state(&map, "cover.a").expect("present");
        assert_eq!(snapshot.attributes.position, Some(80.0));
    }
}
