//! Radial spectrum ring: one bar per frequency bin, recomputed every frame.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Mat4, Quat, Vec3};

use crate::audio::AudioFrame;
use crate::params::{SpectrumRing, SPECTRUM_BINS};

/// Per-frame transform and color of one spectrum bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarInstance {
    pub position: Vec3,

    /// Rotation about the travel axis; the bar's local +Y points outward
    pub rotation: Quat,

    /// x = tangential width, y = outward length, z = depth
    pub scale: Vec3,

    pub color: Vec3,
}

impl BarInstance {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Maps audio frames onto the ring
pub struct SpectrumMapper {
    ring: SpectrumRing,
    bars: [BarInstance; SPECTRUM_BINS],
}

impl SpectrumMapper {
    pub fn new(ring: SpectrumRing) -> Self {
        let mut mapper = Self {
            ring,
            bars: [BarInstance {
                position: Vec3::ZERO,
                rotation: Quat::IDENTITY,
                scale: Vec3::ZERO,
                color: Vec3::ZERO,
            }; SPECTRUM_BINS],
        };
        mapper.update(&AudioFrame::default());
        mapper
    }

    /// Normalized bar intensity for a byte magnitude, never negative
    pub fn intensity(&self, magnitude: u8) -> f32 {
        (magnitude as f32 / 255.0 * self.ring.intensity_gain + self.ring.intensity_bias).max(0.0)
    }

    /// Tangential bar width; neighbors touch at `width_factor == 1`
    pub fn bar_width(&self) -> f32 {
        TAU * self.ring.radius_m / SPECTRUM_BINS as f32 * self.ring.width_factor
    }

    /// Transform and color for bar `index` at `magnitude`
    pub fn map_bar(&self, index: usize, magnitude: u8) -> BarInstance {
        let intensity = self.intensity(magnitude);
        let theta = index as f32 / SPECTRUM_BINS as f32 * TAU;

        let center = Vec3::from_array(self.ring.center);
        let position = center + self.ring.radius_m * Vec3::new(theta.cos(), theta.sin(), 0.0);
        let rotation = Quat::from_rotation_z(theta - FRAC_PI_2);

        let length = (intensity * self.ring.length_gain_m).max(self.ring.min_length_m);
        let scale = Vec3::new(self.bar_width(), length, self.ring.depth_m);

        // Squared blend: mid energy stays near the low accent
        let blend = intensity.min(1.0).powi(2);
        let low = Vec3::from_array(self.ring.accent_low);
        let high = Vec3::from_array(self.ring.accent_high);

        BarInstance {
            position,
            rotation,
            scale,
            color: low.lerp(high, blend),
        }
    }

    /// Recompute every bar from the latest frame
    pub fn update(&mut self, frame: &AudioFrame) -> &[BarInstance] {
        for (index, &magnitude) in frame.bins().iter().enumerate() {
            self.bars[index] = self.map_bar(index, magnitude);
        }
        &self.bars
    }

    pub fn bars(&self) -> &[BarInstance] {
        &self.bars
    }

    pub fn ring(&self) -> &SpectrumRing {
        &self.ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_frame_gives_idle_ring() {
        let ring = SpectrumRing::default();
        let mut mapper = SpectrumMapper::new(ring.clone());
        let bars = mapper.update(&AudioFrame::default());

        assert_eq!(bars.len(), SPECTRUM_BINS);
        for bar in bars {
            assert_eq!(bar.scale.y, ring.min_length_m);
            assert_eq!(bar.color, Vec3::from_array(ring.accent_low));
        }
    }

    #[test]
    fn test_scale_non_negative_at_extremes() {
        let mapper = SpectrumMapper::new(SpectrumRing::default());
        for magnitude in [0u8, 1, 12, 128, 254, 255] {
            let bar = mapper.map_bar(3, magnitude);
            assert!(bar.scale.x >= 0.0);
            assert!(bar.scale.y >= 0.0);
            assert!(bar.scale.z >= 0.0);
        }
        assert_eq!(mapper.intensity(0), 0.0);
    }

    #[test]
    fn test_full_energy_saturates_to_high_accent() {
        let ring = SpectrumRing::default();
        let mapper = SpectrumMapper::new(ring.clone());
        let bar = mapper.map_bar(0, 255);
        assert!(bar.color.abs_diff_eq(Vec3::from_array(ring.accent_high), 1e-6));
        assert!(bar.scale.y > ring.min_length_m);
    }

    #[test]
    fn test_mid_energy_leans_to_low_accent() {
        let ring = SpectrumRing::default();
        let mapper = SpectrumMapper::new(ring.clone());
        let bar = mapper.map_bar(0, 128);
        let low = Vec3::from_array(ring.accent_low);
        let high = Vec3::from_array(ring.accent_high);
        assert!(bar.color.distance(low) < bar.color.distance(high));
    }

    #[test]
    fn test_bars_sit_on_circle_pointing_outward() {
        let ring = SpectrumRing::default();
        let mapper = SpectrumMapper::new(ring.clone());
        let center = Vec3::from_array(ring.center);
        for index in 0..SPECTRUM_BINS {
            let bar = mapper.map_bar(index, 200);
            let radial = bar.position - center;
            assert!((radial.length() - ring.radius_m).abs() < 1e-3);
            assert!(radial.z.abs() < 1e-6);

            // Local +Y rotated into world space points away from the center
            let outward = bar.rotation * Vec3::Y;
            assert!(outward.dot(radial.normalize()) > 0.999);
        }
    }

    #[test]
    fn test_neighbors_touch_at_unit_width() {
        let ring = SpectrumRing {
            width_factor: 1.0,
            ..SpectrumRing::default()
        };
        let mapper = SpectrumMapper::new(ring.clone());
        let total = mapper.bar_width() * SPECTRUM_BINS as f32;
        assert!((total - TAU * ring.radius_m).abs() < 1e-3);
    }

    #[test]
    fn test_louder_is_longer() {
        let mapper = SpectrumMapper::new(SpectrumRing::default());
        let mut previous = 0.0;
        for magnitude in (0..=255u8).step_by(15) {
            let length = mapper.map_bar(5, magnitude).scale.y;
            assert!(length >= previous);
            previous = length;
        }
    }
}
