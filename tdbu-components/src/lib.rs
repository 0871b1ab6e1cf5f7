//! Cover controls for top-down/bottom-up blinds.
//!
//! A top-down/bottom-up blind has two motorized rails sharing one window. This
//! crate turns the two cover entities into a single control:
//!
//! - [`position`] resolves each rail's position and classifies the pair,
//! - [`slider`] is the dual-rail slider state machine,
//! - [`card`] and [`config`] wrap the slider into a dashboard card with a
//!   details dialog.
//!
//! # Example
//!
//! ```
//! use tdbu_components::{card::TdbuCard, config::CardConfig};
//! use tdbu_ui::{EntitySnapshot, EntityStates};
//!
//! let config = CardConfig::from_json_str(
//!     r#"{ "top_entity": "cover.top_rail", "bottom_entity": "cover.bottom_rail" }"#,
//! )
//! .expect("valid config");
//! let card = TdbuCard::new(config);
//!
//! let mut states = EntityStates::new();
//! states.insert("cover.top_rail", EntitySnapshot::new("open").with_current_position(35.0));
//! states.insert("cover.bottom_rail", EntitySnapshot::new("open").with_current_position(20.0));
//!
//! assert_eq!(card.status_label(&states), "Partial");
//! assert_eq!(card.position_rows(&states)[0].value, "35%");
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod card;
pub mod config;
pub mod position;
pub mod slider;

pub use crate::{
    card::{CARD_VERSION, CardAction, TdbuCard, TdbuDialog},
    config::{CardConfig, ConfigError, TapAction},
    position::{
        CoverStatus, UnavailablePolicy, classify, format_pct, is_disabled, resolve_position,
    },
    slider::{
        DualRailSlider, DualRailSliderArgs, EventDisposition, Rail, SliderFrame, SliderSize,
    },
};
