//! Layout configuration.
//!
//! A [`LayoutConfig`] can be built in code or loaded from a TOML table.
//! Fields missing from the table take their [default](LayoutConfig::default) values.
//!
//! ```
//! # use wiring::config::LayoutConfig;
//! let config = LayoutConfig::from_toml_str("wire_spacing = 6.0\nmax_connections = 20\n").unwrap();
//! assert_eq!(config.wire_spacing, 6.0);
//! assert_eq!(config.max_connections, Some(20));
//! assert_eq!(config.rail_offset, LayoutConfig::default().rail_offset);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::connection::PathStyle;
use crate::error::ConfigError;

/// Numeric layout policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Minimum perpendicular clearance between parallel segments of different wires.
    pub wire_spacing: f64,
    /// Spacing between the fan-out lanes of wires that share a source pin.
    pub bundle_spacing: f64,
    /// Minimum distance between consecutive rails.
    pub rail_offset: f64,
    /// Vertical gap between stacked devices.
    pub device_spacing_vertical: f64,
    /// Radius used to round the corners of orthogonal wires.
    pub corner_radius: f64,
    /// Distance of the board's top-left corner from the canvas origin.
    pub board_margin: f64,
    /// Minimum horizontal gap between the board and the device column.
    pub device_offset_x: f64,
    /// Number of straight pieces used to approximate each curved wire.
    pub curve_samples: usize,
    /// The path style of connections that do not specify one.
    pub default_style: PathStyle,
    /// Hard cap on the number of connections.
    pub max_connections: Option<usize>,
    /// Hard cap on the number of devices.
    pub max_devices: Option<usize>,
    /// Connection count above which a warning is raised.
    pub warn_connections: Option<usize>,
    /// Device count above which a warning is raised.
    pub warn_devices: Option<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            wire_spacing: 8.,
            bundle_spacing: 8.,
            rail_offset: 12.,
            device_spacing_vertical: 20.,
            corner_radius: 5.,
            board_margin: 40.,
            device_offset_x: 80.,
            curve_samples: 16,
            default_style: PathStyle::default(),
            max_connections: None,
            max_devices: None,
            warn_connections: None,
            warn_devices: None,
        }
    }
}

impl LayoutConfig {
    /// Parses and validates a configuration from a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading layout config");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("wire_spacing", self.wire_spacing)?;
        positive("bundle_spacing", self.bundle_spacing)?;
        positive("rail_offset", self.rail_offset)?;
        non_negative("device_spacing_vertical", self.device_spacing_vertical)?;
        non_negative("corner_radius", self.corner_radius)?;
        non_negative("board_margin", self.board_margin)?;
        non_negative("device_offset_x", self.device_offset_x)?;
        if self.curve_samples == 0 {
            return Err(ConfigError::Invalid {
                field: "curve_samples",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// The distance between consecutive rails.
    ///
    /// Never smaller than the wire spacing.
    #[inline]
    pub fn rail_pitch(&self) -> f64 {
        self.rail_offset.max(self.wire_spacing)
    }

    /// The distance between fan-out lanes within a bundle.
    ///
    /// Never smaller than the wire spacing.
    #[inline]
    pub fn bundle_pitch(&self) -> f64 {
        self.bundle_spacing.max(self.wire_spacing)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be finite and greater than zero",
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0. {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be finite and not negative",
        })
    }
}
