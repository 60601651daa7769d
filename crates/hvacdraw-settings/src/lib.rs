//! HVACDraw Settings Crate
//!
//! Handles the read-only document configuration consumed by the shape
//! engine: grid size, snap switches, rotation snap increments, document
//! bounds and interaction tuning.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, DocumentBounds, DocumentConfig, GridSettings, InteractionSettings,
    RotationSettings, SnapSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
