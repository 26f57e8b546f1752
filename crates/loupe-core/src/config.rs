#![forbid(unsafe_code)]

//! Tunables for the detail panel as data.
//!
//! [`PanelConfig::default()`] reproduces the shipped panel feel. With the
//! `config` feature the same struct loads from TOML or JSON:
//!
//! ```toml
//! header_fade_ms = 250
//!
//! [spring]
//! stiffness = 120.0
//! damping = 24.0
//!
//! [visuals]
//! backdrop_open = 0.6
//! ```
//!
//! ```rust,ignore
//! let config = PanelConfig::from_toml_file("loupe-panel.toml")?;
//! ```
//!
//! Missing keys fall back to their defaults; loaders reject any config whose
//! [`PanelConfig::validate`] list is non-empty.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

use crate::animation::ease_in_out;
use crate::animation::spring::SpringConfig;
use crate::layout::PanelFractions;
use crate::motion::MotionConfig;
use crate::visuals::VisualRanges;

/// Every tunable of the panel controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PanelConfig {
    /// Position channel.
    pub spring: SpringConfig,
    /// Header fade duration during a snap, in milliseconds. Default: 300.
    pub header_fade_ms: u64,
    /// Opacity endpoints.
    pub visuals: VisualRanges,
    /// Panel height per device class.
    pub layout: PanelFractions,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            spring: SpringConfig::default(),
            header_fade_ms: 300,
            visuals: VisualRanges::default(),
            layout: PanelFractions::default(),
        }
    }
}

impl PanelConfig {
    /// Motion parameters for the snap driver.
    #[must_use]
    pub fn motion(&self) -> MotionConfig {
        MotionConfig {
            spring: self.spring,
            header_fade: Duration::from_millis(self.header_fade_ms),
            header_easing: ease_in_out,
        }
    }

    /// All problems with this config. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.spring.validate();
        if self.header_fade_ms > 10_000 {
            errors.push(format!(
                "header_fade_ms must be <= 10000, got {}",
                self.header_fade_ms
            ));
        }
        errors.extend(self.visuals.validate());
        errors.extend(self.layout.validate());
        errors
    }

    /// Return `self` if valid, otherwise the list of problems.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Serialize to a TOML document.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

/// Errors from loading a [`PanelConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config")]
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
