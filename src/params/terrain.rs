//! Terrain shape parameters.

use crate::error::ConfigError;

/// Mountain valley parameters
///
/// `road_half_width` is normalized: 1.0 would flatten the whole patch.
#[derive(Debug, Clone)]
pub struct TerrainShape {
    /// Grid resolution (segments per side, 64 = 4,225 vertices)
    pub segments: usize,

    /// Patch extent across the travel axis (meters)
    pub width_m: f32,

    /// Patch extent along the travel axis (meters)
    pub depth_m: f32,

    /// Travel-axis coordinate of the patch edge nearest the camera (meters)
    pub near_z: f32,

    /// Normalized half-width of the flat central valley [0, 1)
    pub road_half_width: f32,

    /// Mountain height at the patch edge (meters)
    pub peak_height_m: f32,

    /// Exponent of the valley wall profile (>1 = steeper toward the edges)
    pub profile_power: f32,

    /// Relative height of the traveling ridge noise [0, 1)
    pub noise_strength: f32,

    /// Speed the ridges flow toward the camera (patch depths per second)
    /// Matches the building pool when `depth_m * flow_per_s` equals its speed
    pub flow_per_s: f32,
}

impl Default for TerrainShape {
    fn default() -> Self {
        Self {
            segments: 64,
            width_m: 400.0,
            depth_m: 420.0,
            near_z: 20.0,
            road_half_width: 0.3, // 60m valley floor
            peak_height_m: 55.0,
            profile_power: 1.6,
            noise_strength: 0.45,
            flow_per_s: 40.0 / 420.0, // building speed / depth_m
        }
    }
}

impl TerrainShape {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segments == 0 {
            return Err(ConfigError::NotPositive("segments"));
        }
        ConfigError::check_positive("width_m", self.width_m)?;
        ConfigError::check_positive("depth_m", self.depth_m)?;
        ConfigError::check_range("road_half_width", self.road_half_width, 0.0, 0.99)?;
        ConfigError::check_range("noise_strength", self.noise_strength, 0.0, 0.99)?;
        ConfigError::check_positive("profile_power", self.profile_power)
    }
}
