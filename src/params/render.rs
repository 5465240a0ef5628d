//! Viewport and frame clock configuration.

use crate::error::ConfigError;

/// Rendering configuration (the viewport the camera projects into)
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    /// 70° = wide enough to feel speed without fisheye on the buildings
    pub fov_degrees: f32,

    /// Near clipping plane (meters)
    pub near_plane_m: f32,

    /// Far clipping plane (meters)
    /// Must reach past the spectrum ring and the building respawn line
    pub far_plane_m: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 70.0,
            near_plane_m: 0.1,
            far_plane_m: 1000.0,
        }
    }
}

impl RenderConfig {
    /// Width / height, guarded against a minimized (zero-height) window
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width.max(1) as f32 / self.window_height.max(1) as f32
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_range("fov_degrees", self.fov_degrees, 1.0, 179.0)?;
        ConfigError::check_positive("near_plane_m", self.near_plane_m)?;
        ConfigError::check_range(
            "far_plane_m",
            self.far_plane_m,
            self.near_plane_m,
            f32::MAX,
        )
    }
}

/// Frame clock limits
#[derive(Debug, Clone)]
pub struct ClockConfig {
    /// Largest delta fed to the simulation (seconds)
    /// 0.1 = anything slower than 10 FPS (or a suspended window) is slowed down
    pub max_delta_s: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { max_delta_s: 0.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_survives_minimized_window() {
        let mut config = RenderConfig::default();
        assert!((config.aspect_ratio() - 1280.0 / 720.0).abs() < 1e-6);

        config.resize(800, 0);
        assert!(config.aspect_ratio().is_finite());
    }

    #[test]
    fn test_default_viewport_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }
}
