//! Configuration for the navigation controller.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Navigator tuning parameters.
///
/// The defaults match the stock calibration: the tolerance band is half
/// the corridor width, the centering creep a quarter of it. Backends
/// with different sensor mounts or wider wheelbases adjust these to keep
/// junction stop positions within one tolerance band of each other
/// across approach directions.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Scale applied to the calibrated corridor threshold (the sum of
    /// the two forward-diagonal readings), e.g. to deduct chassis width.
    /// Default: 1.0
    pub wall_scale: f32,

    /// Position tolerance band as a fraction of the corridor threshold.
    /// Default: 0.5
    pub tolerance_fraction: f32,

    /// Junction centering creep as a fraction of the corridor threshold.
    /// Default: 0.25
    pub creep_fraction: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            wall_scale: 1.0,
            tolerance_fraction: 0.5,
            creep_fraction: 0.25,
        }
    }
}

impl NavConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Builder-style setter for the wall threshold scale.
    pub fn with_wall_scale(mut self, scale: f32) -> Self {
        self.wall_scale = scale;
        self
    }

    /// Builder-style setter for the tolerance fraction.
    pub fn with_tolerance_fraction(mut self, fraction: f32) -> Self {
        self.tolerance_fraction = fraction;
        self
    }

    /// Builder-style setter for the creep fraction.
    pub fn with_creep_fraction(mut self, fraction: f32) -> Self {
        self.creep_fraction = fraction;
        self
    }
}
