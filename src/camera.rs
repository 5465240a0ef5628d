//! Procedural flight trajectory with banking and engine jitter.
//!
//! The target path is a closed-form sum of sines of elapsed time; the camera
//! chases it with exponential smoothing, banks against its lateral velocity
//! and shakes with a deterministic high-frequency jitter.

use glam::{Mat4, Quat, Vec3};

use crate::clock::FrameTime;
use crate::params::{FlightPath, RenderConfig};

/// Camera pose for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,

    /// Look-at point
    pub target: Vec3,

    /// Rotation about the camera's backward axis (radians)
    ///
    /// Positive turns the view counter-clockwise and drops the left side.
    pub roll_rad: f32,
}

impl CameraPose {
    /// World-to-view matrix with the up vector rolled about the backward axis
    pub fn view_matrix(&self) -> Mat4 {
        let backward = (self.position - self.target).normalize_or_zero();
        let up = if backward == Vec3::ZERO {
            Vec3::Y
        } else {
            Quat::from_axis_angle(backward, self.roll_rad) * Vec3::Y
        };
        Mat4::look_at_rh(self.position, self.target, up)
    }

    /// Clip-space view-projection matrix for the given viewport
    pub fn view_proj(&self, render_config: &RenderConfig) -> Mat4 {
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane_m,
            render_config.far_plane_m,
        );
        proj * self.view_matrix()
    }
}

/// Flight trajectory synthesizer (single continuous state: the current pose)
pub struct FlightSynthesizer {
    path: FlightPath,

    /// Smoothed position before jitter
    smoothed_position: Vec3,

    /// Smoothed roll before jitter
    smoothed_roll: f32,

    pose: CameraPose,
}

impl FlightSynthesizer {
    /// Create a synthesizer resting at the path's initial position
    pub fn new(path: FlightPath) -> Self {
        let position = Vec3::from_array(path.initial_position);
        let pose = CameraPose {
            position,
            target: position - Vec3::Z * path.look_ahead_m,
            roll_rad: 0.0,
        };
        Self {
            path,
            smoothed_position: position,
            smoothed_roll: 0.0,
            pose,
        }
    }

    /// Where the camera wants to be at time `time_s`
    ///
    /// The travel-axis coordinate never changes: the world moves instead.
    pub fn target_position(&self, time_s: f32) -> Vec3 {
        let x: f32 = self
            .path
            .lateral_terms
            .iter()
            .map(|term| term.sample(time_s))
            .sum();
        let y: f32 = self.path.base_altitude_m
            + self
                .path
                .vertical_terms
                .iter()
                .map(|term| term.sample(time_s))
                .sum::<f32>();
        Vec3::new(x, y, self.path.initial_position[2])
    }

    /// Analytic lateral velocity of the target path (meters per second)
    pub fn lateral_rate(&self, time_s: f32) -> f32 {
        self.path
            .lateral_terms
            .iter()
            .map(|term| term.derivative(time_s))
            .sum()
    }

    /// Engine vibration at time `time_s`: (position offset, roll offset)
    ///
    /// Pure function of time, zero at `t = 0`.
    pub fn jitter(&self, time_s: f32) -> (Vec3, f32) {
        let [fast, faster] = self.path.jitter_freqs_rad_s;
        let a = (time_s * fast).sin();
        let b = (time_s * faster).sin();

        let offset = Vec3::new(a, 0.6 * a * b + 0.4 * b, 0.0) * self.path.jitter_amplitude_m;
        let roll = (0.7 * b + 0.3 * a) * self.path.roll_jitter_rad;
        (offset, roll)
    }

    /// Advance the camera by one frame
    pub fn update(&mut self, frame: FrameTime) -> CameraPose {
        let t = frame.elapsed_s;
        let target = self.target_position(t);
        let alpha = self.path.smoothing.alpha(frame.delta_s);

        self.smoothed_position = self.smoothed_position.lerp(target, alpha);

        // Bank into the turn: moving right (+x) rolls clockwise, right side down
        let target_roll = -self.path.bank_gain * self.lateral_rate(t);
        self.smoothed_roll += (target_roll - self.smoothed_roll) * alpha;

        let (jitter_offset, jitter_roll) = self.jitter(t);
        let position = self.smoothed_position + jitter_offset;

        // Look into the turn
        let look_offset = target * self.path.look_offset_fraction;
        let look_at = Vec3::new(
            look_offset.x,
            look_offset.y,
            position.z - self.path.look_ahead_m,
        );

        self.pose = CameraPose {
            position,
            target: look_at,
            roll_rad: self.smoothed_roll + jitter_roll,
        };
        self.pose
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn path(&self) -> &FlightPath {
        &self.path
    }
}
