//! Prop pool layouts: where buildings and speed-streaks live and how fast they travel.

use crate::error::ConfigError;

/// Travel-axis window a pool recycles its props through
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolBounds {
    /// Horizon coordinate props respawn at (meters, negative = ahead of camera)
    pub respawn_z: f32,

    /// Props past this coordinate have left the view (meters)
    pub despawn_z: f32,

    /// Travel speed toward the camera (meters per second)
    pub speed_m_per_s: f32,
}

impl PoolBounds {
    pub fn contains(&self, z: f32) -> bool {
        (self.respawn_z..=self.despawn_z).contains(&z)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.respawn_z >= self.despawn_z {
            return Err(ConfigError::InvertedBounds {
                respawn_z: self.respawn_z,
                despawn_z: self.despawn_z,
            });
        }
        ConfigError::check_positive("speed_m_per_s", self.speed_m_per_s)
    }
}

/// City block layout (buildings lining both sides of the road)
#[derive(Debug, Clone)]
pub struct BuildingLayout {
    /// Fixed pool size
    pub count: usize,

    pub bounds: PoolBounds,

    /// Half-width of the empty central road (meters)
    pub road_half_width_m: f32,

    /// Extra lateral distance beyond the road a building may sit at (meters)
    pub lateral_spread_m: f32,

    /// Footprint width range (meters)
    pub width_range_m: (f32, f32),

    /// Footprint depth range (meters)
    pub depth_range_m: (f32, f32),

    /// Height range (meters)
    pub height_range_m: (f32, f32),

    /// Distance past the respawn line where fading in begins (meters)
    pub fade_margin_m: f32,

    /// Length of the fade band (meters)
    pub fade_length_m: f32,
}

impl Default for BuildingLayout {
    fn default() -> Self {
        Self {
            count: 120,
            bounds: PoolBounds {
                respawn_z: -400.0,
                despawn_z: 10.0,
                speed_m_per_s: 40.0,
            },
            road_half_width_m: 10.0,
            lateral_spread_m: 50.0,
            width_range_m: (4.0, 10.0),
            depth_range_m: (4.0, 10.0),
            height_range_m: (8.0, 45.0),
            fade_margin_m: 0.0,
            fade_length_m: 80.0,
        }
    }
}

impl BuildingLayout {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;
        check_span("width_range_m", self.width_range_m)?;
        check_span("depth_range_m", self.depth_range_m)?;
        check_span("height_range_m", self.height_range_m)?;
        ConfigError::check_range("fade_length_m", self.fade_length_m, 0.0, f32::MAX)
    }
}

/// Speed-streak layout (thin light trails that sell the sense of speed)
#[derive(Debug, Clone)]
pub struct StreakLayout {
    /// Fixed pool size
    pub count: usize,

    pub bounds: PoolBounds,

    /// Half-width of the streak-free corridor around the camera (meters)
    pub road_half_width_m: f32,

    /// Lateral distance beyond the corridor a streak may appear at (meters)
    pub lateral_spread_m: f32,

    /// Height above ground range (meters)
    pub height_range_m: (f32, f32),

    /// Streak length along the travel axis (meters)
    pub length_m: f32,

    /// Streak cross-section (meters)
    pub thickness_m: f32,
}

impl Default for StreakLayout {
    fn default() -> Self {
        Self {
            count: 30,
            bounds: PoolBounds {
                respawn_z: -300.0,
                despawn_z: 10.0,
                speed_m_per_s: 160.0, // 4x buildings for parallax
            },
            road_half_width_m: 2.0,
            lateral_spread_m: 30.0,
            height_range_m: (0.5, 14.0),
            length_m: 12.0,
            thickness_m: 0.08,
        }
    }
}

impl StreakLayout {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;
        check_span("height_range_m", self.height_range_m)?;
        ConfigError::check_positive("length_m", self.length_m)
    }
}

fn check_span(name: &'static str, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    ConfigError::check_range(name, max, min, f32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layouts_are_valid() {
        assert!(BuildingLayout::default().validate().is_ok());
        assert!(StreakLayout::default().validate().is_ok());
    }

    #[test]
    fn test_streaks_outrun_buildings() {
        let buildings = BuildingLayout::default();
        let streaks = StreakLayout::default();
        assert!(streaks.bounds.speed_m_per_s > buildings.bounds.speed_m_per_s);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let bounds = PoolBounds {
            respawn_z: 10.0,
            despawn_z: -10.0,
            speed_m_per_s: 1.0,
        };
        assert_eq!(
            bounds.validate(),
            Err(ConfigError::InvertedBounds {
                respawn_z: 10.0,
                despawn_z: -10.0,
            })
        );
    }
}
