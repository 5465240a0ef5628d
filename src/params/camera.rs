//! Flight path configuration.

use crate::error::ConfigError;

/// One `amplitude * sin(freq * t + phase)` term of a flight signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineTerm {
    /// Peak offset (meters)
    pub amplitude_m: f32,

    /// Angular frequency (radians per second)
    pub freq_rad_s: f32,

    /// Phase offset at t = 0 (radians)
    pub phase_rad: f32,
}

impl SineTerm {
    pub const fn new(amplitude_m: f32, freq_rad_s: f32, phase_rad: f32) -> Self {
        Self {
            amplitude_m,
            freq_rad_s,
            phase_rad,
        }
    }

    /// Value at time `t` (seconds)
    pub fn sample(&self, t: f32) -> f32 {
        self.amplitude_m * (self.freq_rad_s * t + self.phase_rad).sin()
    }

    /// Analytic derivative at time `t` (meters per second)
    pub fn derivative(&self, t: f32) -> f32 {
        self.amplitude_m * self.freq_rad_s * (self.freq_rad_s * t + self.phase_rad).cos()
    }

    /// Upper bound of `|derivative|`
    pub fn max_rate(&self) -> f32 {
        (self.amplitude_m * self.freq_rad_s).abs()
    }
}

/// How the camera chases its target each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmoothingMode {
    /// `alpha = 1 - exp(-rate * dt)`: same motion at any frame rate
    DeltaScaled { rate_per_s: f32 },

    /// Constant `alpha` per frame: only correct at a roughly fixed frame rate
    PerFrame { factor: f32 },
}

impl SmoothingMode {
    /// Interpolation factor for a frame of `delta_s` seconds
    ///
    /// A zero delta never moves the camera, in either mode.
    pub fn alpha(&self, delta_s: f32) -> f32 {
        if delta_s <= 0.0 {
            return 0.0;
        }
        match *self {
            Self::DeltaScaled { rate_per_s } => 1.0 - (-rate_per_s * delta_s).exp(),
            Self::PerFrame { factor } => factor,
        }
    }
}

impl Default for SmoothingMode {
    fn default() -> Self {
        Self::DeltaScaled { rate_per_s: 3.0 }
    }
}

/// Procedural flight path parameters
///
/// Frequencies are chosen with irrational ratios (√2, golden ratio, ...) so
/// the summed signal never visibly repeats.
#[derive(Debug, Clone)]
pub struct FlightPath {
    /// Camera position before the first smoothing step (meters)
    pub initial_position: [f32; 3],

    /// Altitude the vertical terms oscillate around (meters)
    pub base_altitude_m: f32,

    /// Lateral (x) sway terms
    pub lateral_terms: [SineTerm; 3],

    /// Vertical (y) swoop terms
    pub vertical_terms: [SineTerm; 3],

    /// Distance of the look-at point ahead of the camera (meters)
    pub look_ahead_m: f32,

    /// Fraction of the target offset applied to the look-at point
    /// 0 = always look straight down the travel axis
    pub look_offset_fraction: f32,

    /// Roll per unit lateral velocity (radians per m/s)
    pub bank_gain: f32,

    /// Engine vibration amplitude on position (meters)
    pub jitter_amplitude_m: f32,

    /// Engine vibration amplitude on roll (radians)
    pub roll_jitter_rad: f32,

    /// Engine vibration frequencies (radians per second)
    pub jitter_freqs_rad_s: [f32; 2],

    /// Target chasing behavior
    pub smoothing: SmoothingMode,
}

impl Default for FlightPath {
    fn default() -> Self {
        Self {
            initial_position: [0.0, 6.0, 0.0],
            base_altitude_m: 6.0,

            lateral_terms: [
                SineTerm::new(4.0, 0.31, 0.0),
                SineTerm::new(2.2, 0.31 * std::f32::consts::SQRT_2, 1.3),
                SineTerm::new(0.9, 0.31 * 5.236_068, 0.0), // 0.31 * (φ + φ²)
            ],
            vertical_terms: [
                SineTerm::new(1.5, 0.23, 0.4),
                SineTerm::new(0.8, 0.23 * std::f32::consts::E, 2.1),
                SineTerm::new(0.3, 0.23 * 6.141_593, 0.0), // 0.23 * (π + 3)
            ],

            look_ahead_m: 60.0,
            look_offset_fraction: 0.5,
            bank_gain: 0.08,

            jitter_amplitude_m: 0.03,
            roll_jitter_rad: 0.004,
            jitter_freqs_rad_s: [37.0, 53.3],

            smoothing: SmoothingMode::default(),
        }
    }
}

impl FlightPath {
    /// Upper bound of the lateral target speed (meters per second)
    pub fn max_lateral_rate(&self) -> f32 {
        self.lateral_terms.iter().map(SineTerm::max_rate).sum()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("look_ahead_m", self.look_ahead_m)?;
        match self.smoothing {
            SmoothingMode::DeltaScaled { rate_per_s } => {
                ConfigError::check_positive("smoothing rate_per_s", rate_per_s)
            }
            SmoothingMode::PerFrame { factor } => {
                ConfigError::check_range("smoothing factor", factor, 0.0, 1.0)
            }
        }
    }
}
