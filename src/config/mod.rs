//! Display configuration
//!
//! [`DisplayConfig`] carries the few settings the cursor engine needs from
//! outside: how to treat non-finite converter results, how many significant
//! digits captions print, optional cursor color overrides and the log filter used by
//! the demo binary.
//!
//! # Files
//!
//! Stored as TOML when the path ends in `.toml`, JSON otherwise. The default
//! location is the platform config directory:
//! - **Linux**: `~/.config/scopeview-rs/display.toml`
//! - **macOS**: `~/Library/Application Support/scopeview-rs/display.toml`
//! - **Windows**: `%APPDATA%\scopeview-rs\display.toml`
//!
//! # Example
//!
//! ```ignore
//! use scopeview_rs::config::DisplayConfig;
//!
//! let config = DisplayConfig::load_or_default("display.toml");
//! config.save("display.json")?;
//! ```

use crate::display::Color;
use crate::error::{Result, ScopeError};
use crate::format::DEFAULT_SIGNIFICANT_DIGITS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application directory name under the platform config directory
pub const APP_DIR: &str = "scopeview-rs";

/// Default configuration filename
pub const CONFIG_FILE: &str = "display.toml";

/// Default `tracing` filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info,scopeview_rs=debug";

/// Platform-specific default config path
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// What a converter does with a NaN or infinite recomputed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidValuePolicy {
    /// Pass the value on; the cursor is drawn at a NaN/off-screen position
    #[default]
    Propagate,
    /// Keep the last finite value and log a warning
    HoldLast,
}

/// Override colors for measurement cursors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorColors {
    #[serde(default = "default_reference_color")]
    pub reference: Color,
    #[serde(default = "default_measurement_color")]
    pub measurement: Color,
}

fn default_reference_color() -> Color {
    Color::CYAN
}

fn default_measurement_color() -> Color {
    Color::YELLOW
}

impl Default for CursorColors {
    fn default() -> Self {
        Self {
            reference: default_reference_color(),
            measurement: default_measurement_color(),
        }
    }
}

impl CursorColors {
    /// Color for a reference or non-reference cursor
    pub fn for_role(&self, is_reference: bool) -> Color {
        if is_reference {
            self.reference
        } else {
            self.measurement
        }
    }
}

/// Configuration of the cursor display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Handling of non-finite converter results
    #[serde(default)]
    pub invalid_value_policy: InvalidValuePolicy,

    /// Significant digits printed in captions
    #[serde(default = "default_significant_digits")]
    pub significant_digits: usize,

    /// `tracing` filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Measurement cursor colors; when unset, cursors take the color of
    /// their axis viewmodel (graph base or channel)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_colors: Option<CursorColors>,
}

fn default_significant_digits() -> usize {
    DEFAULT_SIGNIFICANT_DIGITS
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            invalid_value_policy: InvalidValuePolicy::default(),
            significant_digits: default_significant_digits(),
            log_filter: default_log_filter(),
            cursor_colors: None,
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

impl DisplayConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ScopeError::Config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Load from disk, TOML for `.toml` files and JSON otherwise
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScopeError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        if is_toml(path) {
            Self::from_toml_str(&content)
        } else {
            serde_json::from_str(&content).map_err(|e| {
                ScopeError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })
        }
    }

    /// Load from disk, returning defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save to disk in the format implied by the extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScopeError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = if is_toml(path) {
            toml::to_string_pretty(self)
                .map_err(|e| ScopeError::Config(format!("Failed to serialize config: {}", e)))?
        } else {
            serde_json::to_string_pretty(self)
                .map_err(|e| ScopeError::Config(format!("Failed to serialize config: {}", e)))?
        };

        std::fs::write(path, content).map_err(|e| {
            ScopeError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }
}
