//! Error types for the simulation core and its audio/render collaborators.
//!
//! Nothing here is fatal to the render loop: audio errors degrade to an idle
//! spectrum ring, configuration errors surface before the loop starts.

use thiserror::Error;

/// Parameter validation failures
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("FFT size must be power of 2, got {0}")]
    FftSizeNotPowerOfTwo(usize),

    #[error("FFT size {fft_size} yields {bins} bins, spectrum ring expects {expected}")]
    BinCountMismatch {
        fft_size: usize,
        bins: usize,
        expected: usize,
    },

    #[error("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("pool bounds inverted: respawn_z {respawn_z} must be below despawn_z {despawn_z}")]
    InvertedBounds { respawn_z: f32, despawn_z: f32 },
}

impl ConfigError {
    /// Check `value` lies in `[min, max]`
    pub fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), Self> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Self::OutOfRange {
                name,
                value,
                min,
                max,
            })
        }
    }

    /// Check `value` is strictly positive (and finite)
    pub fn check_positive(name: &'static str, value: f32) -> Result<(), Self> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::NotPositive(name))
        }
    }
}

/// Audio graph construction failures (all recovered by an idle analyzer)
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("invalid analyzer config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("no audio output device found")]
    NoOutputDevice,

    #[error("failed to query output config: {0}")]
    OutputConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("unsupported output sample format {0:?} (f32 required)")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("failed to decode soundtrack: {0}")]
    Decode(#[from] hound::Error),

    #[error("soundtrack contains no samples")]
    EmptySoundtrack,

    #[error("glicol engine init failed: {0}")]
    Synth(String),

    #[error("failed to spawn analysis thread: {0}")]
    AnalysisThread(#[source] std::io::Error),
}

/// GPU setup failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("surface reports no supported formats")]
    IncompatibleSurface,

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}
