//! Document configuration for HVACDraw
//!
//! Provides configuration file handling and validation for the settings
//! the shape engine reads while an interaction is running. Supports JSON
//! and TOML file formats stored in the platform configuration directory.
//!
//! Configuration is organized into logical sections:
//! - Grid settings (spacing, snap-to-grid)
//! - Snap settings (dynamic guides, tolerance)
//! - Rotation settings (snap increments)
//! - Document bounds (size, auto-grow)
//! - Interaction tuning (autoscroll, aspect constraint, knob size)

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use hvacdraw_core::constants::{
    DEFAULT_GUIDE_TOLERANCE, ENHANCED_ROTATE_SNAP, KNOB_SIZE, ROTATE_SNAP,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Grid spacing in document units
    pub spacing: f64,
    /// Snap pointer positions to the grid
    pub snap_to_grid: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            spacing: 10.0,
            snap_to_grid: true,
        }
    }
}

/// Snap settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Master switch for every snap (grid, guides, rotation)
    pub enabled: bool,
    /// Align against sibling shapes while dragging
    pub dynamic_guides: bool,
    /// Maximum edge distance for a guide to engage
    pub guide_tolerance: f64,
    /// Also align shape centers, not only edges
    pub include_centers: bool,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            dynamic_guides: true,
            guide_tolerance: DEFAULT_GUIDE_TOLERANCE,
            include_centers: true,
        }
    }
}

/// Rotation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSettings {
    /// Snap increment in degrees
    pub snap_increment: f64,
    /// Snap increment while the enhance modifier is held
    pub enhanced_snap_increment: f64,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            snap_increment: ROTATE_SNAP,
            enhanced_snap_increment: ENHANCED_ROTATE_SNAP,
        }
    }
}

/// Document bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentBounds {
    /// Document width
    pub width: f64,
    /// Document height
    pub height: f64,
    /// When set the document never grows, so shapes must stay inside it
    pub no_auto_grow: bool,
}

impl Default for DocumentBounds {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 750.0,
            no_auto_grow: false,
        }
    }
}

/// Interaction tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Interval between synthetic pointer samples while autoscrolling
    pub autoscroll_interval_ms: u64,
    /// Distance from the viewport edge that starts autoscroll
    pub autoscroll_edge_margin: f64,
    /// Lock aspect ratio on resize unless the modifier is held
    pub always_constrain_aspect: bool,
    /// Selection knob size
    pub knob_size: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            autoscroll_interval_ms: 100,
            autoscroll_edge_margin: 20.0,
            always_constrain_aspect: false,
            knob_size: KNOB_SIZE,
        }
    }
}

/// Complete document configuration
///
/// Aggregates all settings sections and provides file I/O operations.
/// The engine treats it as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DocumentConfig {
    /// Grid settings
    pub grid: GridSettings,
    /// Snap settings
    pub snap: SnapSettings,
    /// Rotation settings
    pub rotation: RotationSettings,
    /// Document bounds
    pub document: DocumentBounds,
    /// Interaction tuning
    pub interaction: InteractionSettings,
}

impl DocumentConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    ///
    /// Parse failures and out-of-range values come back as
    /// [`SettingsError::LoadError`] naming the file.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let load_error = |e: &dyn std::fmt::Display| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        };

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content).map_err(|e| load_error(&e))?,
            Some("toml") => toml::from_str(&content).map_err(|e| load_error(&e))?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        config.validate().map_err(|e| load_error(&e))?;
        tracing::debug!("Loaded document config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration
    ///
    /// Every numeric field must be finite; NaN fails each range check.
    pub fn validate(&self) -> ConfigResult<()> {
        positive("grid.spacing", self.grid.spacing)?;

        if !(self.snap.guide_tolerance >= 0.0 && self.snap.guide_tolerance.is_finite()) {
            return Err(ConfigError::out_of_range(
                "snap.guide_tolerance",
                self.snap.guide_tolerance,
            ));
        }

        for (key, increment) in [
            ("rotation.snap_increment", self.rotation.snap_increment),
            (
                "rotation.enhanced_snap_increment",
                self.rotation.enhanced_snap_increment,
            ),
        ] {
            if !(increment > 0.0 && increment <= 360.0) {
                return Err(ConfigError::out_of_range(key, increment));
            }
        }

        positive("document.width", self.document.width)?;
        positive("document.height", self.document.height)?;

        if self.interaction.autoscroll_interval_ms == 0 {
            return Err(ConfigError::out_of_range(
                "interaction.autoscroll_interval_ms",
                0,
            ));
        }

        if !(self.interaction.autoscroll_edge_margin >= 0.0
            && self.interaction.autoscroll_edge_margin.is_finite())
        {
            return Err(ConfigError::out_of_range(
                "interaction.autoscroll_edge_margin",
                self.interaction.autoscroll_edge_margin,
            ));
        }

        positive("interaction.knob_size", self.interaction.knob_size)?;

        Ok(())
    }

    /// Rotation snap increment for the current modifier state
    pub fn rotate_snap(&self, enhanced: bool) -> f64 {
        if enhanced {
            self.rotation.enhanced_snap_increment
        } else {
            self.rotation.snap_increment
        }
    }

    /// Grid snapping is active
    pub fn grid_snap_active(&self) -> bool {
        self.snap.enabled && self.grid.snap_to_grid
    }
}

/// Default config file location (`<config dir>/hvacdraw/document.toml`)
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| SettingsError::ConfigDirectory("no platform config dir".to_string()))?;
    Ok(dir.join("hvacdraw").join("document.toml"))
}

fn positive(key: &str, value: f64) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(key, value))
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
