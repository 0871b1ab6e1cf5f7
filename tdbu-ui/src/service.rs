//! Outbound position commands.
//!
//! Controls never mutate the entity store. They emit a [`SetPosition`]
//! through a [`CommandChannel`] and let the external service report the new
//! position back through the store later.

use serde::{Deserialize, Serialize};

use crate::CallbackWith;

/// Fire-and-forget channel for position commands.
pub type CommandChannel = CallbackWith<SetPosition>;

/// Request to move a named entity to an integer position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetPosition {
    /// Target entity.
    pub entity_id: String,
    /// Target position, always within 0..=100.
    pub position: u8,
}

impl SetPosition {
    /// Service domain the command is addressed to.
    pub const DOMAIN: &'static str = "cover";
    /// Service name within [`Self::DOMAIN`].
    pub const SERVICE: &'static str = "set_cover_position";

    /// Builds a command, clamping `position` to 100.
    pub fn new(entity_id: impl Into<String>, position: u8) -> Self {
        Self {
            entity_id: entity_id.into(),
            position: position.min(100),
        }
    }

    /// The service-call payload, `{"entity_id": ..., "position": ...}`.
    pub fn service_data(&self) -> serde_json::Value {
        serde_json::json!({
            "entity_id": self.entity_id,
            "position": self.position,
        })
    }
}
