//! Decode configuration.
//!
//! Recognized keys (JSON): `coordScale`, `radiusScale`, `threshold`.
//! Any key left out falls back to its default; a missing `threshold`
//! resolves per profile.

use serde::{Deserialize, Serialize};

use crate::codec::dequant::{DEFAULT_COORD_SCALE, DEFAULT_RADIUS_SCALE};
use crate::codec::EncodingProfile;
use crate::{Error, Result};

/// Scale constants and inclusion threshold for one decode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DecodeConfig {
    /// Divisor for int16 coordinates.
    pub coord_scale: i32,
    /// Divisor for uint16 radii.
    pub radius_scale: u32,
    /// Inclusion threshold; `None` means "the profile's default".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            coord_scale: DEFAULT_COORD_SCALE,
            radius_scale: DEFAULT_RADIUS_SCALE,
            threshold: None,
        }
    }
}

impl DecodeConfig {
    /// Parse and validate a JSON config object.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DecodeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_coord_scale(mut self, scale: i32) -> Self {
        self.coord_scale = scale;
        self
    }

    pub fn with_radius_scale(mut self, scale: u32) -> Self {
        self.radius_scale = scale;
        self
    }

    /// The threshold in effect for `profile`.
    pub fn threshold_for(&self, profile: &EncodingProfile) -> f64 {
        self.threshold.unwrap_or_else(|| profile.default_threshold())
    }

    /// Reject scales that would divide by zero or flip signs, and thresholds
    /// that no weight can be compared against.
    pub fn validate(&self) -> Result<()> {
        if self.coord_scale <= 0 {
            return Err(Error::InvalidConfig(format!(
                "coordScale must be positive, got {}",
                self.coord_scale
            )));
        }
        if self.radius_scale == 0 {
            return Err(Error::InvalidConfig("radiusScale must be positive, got 0".into()));
        }
        if let Some(t) = self.threshold {
            if !t.is_finite() {
                return Err(Error::InvalidConfig(format!("threshold must be finite, got {t}")));
            }
        }
        Ok(())
    }
}
