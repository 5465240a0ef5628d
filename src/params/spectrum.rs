//! Radial visualizer ring parameters.

use super::{ACCENT_CYAN, ACCENT_PINK};
use crate::error::ConfigError;

/// Ring of spectrum bars floating over the horizon
#[derive(Debug, Clone)]
pub struct SpectrumRing {
    /// Ring center in world space (meters)
    pub center: [f32; 3],

    /// Ring radius (meters)
    pub radius_m: f32,

    /// Intensity = max(magnitude / 255 * gain + bias, 0)
    pub intensity_gain: f32,

    /// Negative values keep quiet bins flat
    pub intensity_bias: f32,

    /// Bar length at intensity 1 (meters)
    pub length_gain_m: f32,

    /// Shortest drawn bar (meters)
    pub min_length_m: f32,

    /// 1.0 = neighboring bars touch
    pub width_factor: f32,

    /// Bar thickness along the travel axis (meters)
    pub depth_m: f32,

    /// Color at zero intensity
    pub accent_low: [f32; 3],

    /// Color at full intensity
    pub accent_high: [f32; 3],
}

impl Default for SpectrumRing {
    fn default() -> Self {
        Self {
            center: [0.0, 45.0, -320.0],
            radius_m: 30.0,
            intensity_gain: 1.25,
            intensity_bias: -0.1,
            length_gain_m: 40.0,
            min_length_m: 0.3, // idle ring stays visible
            width_factor: 0.8,
            depth_m: 1.0,
            accent_low: ACCENT_PINK,
            accent_high: ACCENT_CYAN,
        }
    }
}

impl SpectrumRing {
    /// Every bar scale must come out non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("radius_m", self.radius_m)?;
        ConfigError::check_positive("width_factor", self.width_factor)?;
        ConfigError::check_positive("depth_m", self.depth_m)?;
        ConfigError::check_range("length_gain_m", self.length_gain_m, 0.0, f32::MAX)?;
        ConfigError::check_range("min_length_m", self.min_length_m, 0.0, f32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ring_is_valid() {
        assert!(SpectrumRing::default().validate().is_ok());
    }

    #[test]
    fn test_negative_dimensions_rejected() {
        let ring = SpectrumRing {
            width_factor: -0.8,
            ..SpectrumRing::default()
        };
        assert_eq!(ring.validate(), Err(ConfigError::NotPositive("width_factor")));

        let ring = SpectrumRing {
            radius_m: -30.0,
            ..SpectrumRing::default()
        };
        assert_eq!(ring.validate(), Err(ConfigError::NotPositive("radius_m")));

        let ring = SpectrumRing {
            depth_m: 0.0,
            ..SpectrumRing::default()
        };
        assert!(ring.validate().is_err());

        let ring = SpectrumRing {
            min_length_m: -1.0,
            ..SpectrumRing::default()
        };
        assert!(ring.validate().is_err());
    }
}
