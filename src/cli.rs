//! Command-line argument parsing.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::audio::SoundtrackSource;
use crate::params::{RenderConfig, SmoothingMode};
use crate::simulation::SimulationConfig;

/// Camera smoothing flavor
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SmoothingArg {
    /// Frame-rate independent exponential smoothing
    Delta,
    /// Fixed factor per rendered frame
    PerFrame,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "synthflight")]
#[command(about = "Endless synthwave flight with an audio-reactive spectrum ring")]
pub struct Args {
    /// WAV file to play (defaults to a procedural Glicol loop)
    #[arg(long, value_name = "WAV")]
    pub soundtrack: Option<PathBuf>,

    /// Seed for city layout (random when omitted)
    #[arg(long, value_name = "U64")]
    pub seed: Option<u64>,

    /// Camera smoothing: delta (default) or per-frame
    #[arg(long, value_enum, default_value_t = SmoothingArg::Delta)]
    pub smoothing: SmoothingArg,

    /// Start without audio (spectrum ring stays idle)
    #[arg(long)]
    pub mute: bool,

    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "1280")]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "720")]
    pub height: u32,

    /// Vertical field of view (degrees)
    #[arg(long, value_name = "DEGREES", default_value = "70")]
    pub fov: f32,
}

impl Args {
    pub fn soundtrack_source(&self) -> SoundtrackSource {
        match &self.soundtrack {
            Some(path) => SoundtrackSource::Wav(path.clone()),
            None => SoundtrackSource::Synth,
        }
    }

    /// Simulation parameters with CLI overrides applied
    pub fn simulation_config(&self) -> SimulationConfig {
        let mut config = SimulationConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            ..SimulationConfig::default()
        };
        if self.smoothing == SmoothingArg::PerFrame {
            config.flight.smoothing = SmoothingMode::PerFrame { factor: 0.05 };
        }
        log::info!(
            "Seed {} ({:?} smoothing)",
            config.seed,
            config.flight.smoothing
        );
        config
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            fov_degrees: self.fov,
            ..RenderConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["synthflight"]).unwrap();
        assert!(matches!(args.soundtrack_source(), SoundtrackSource::Synth));
        assert_eq!(args.smoothing, SmoothingArg::Delta);
        assert!(!args.mute);

        let render = args.render_config();
        assert_eq!((render.window_width, render.window_height), (1280, 720));
        assert!(render.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "synthflight",
            "--soundtrack",
            "night.wav",
            "--seed",
            "42",
            "--smoothing",
            "per-frame",
            "--fov",
            "90",
        ])
        .unwrap();

        assert!(matches!(
            args.soundtrack_source(),
            SoundtrackSource::Wav(path) if path.ends_with("night.wav")
        ));
        let config = args.simulation_config();
        assert_eq!(config.seed, 42);
        assert!(matches!(
            config.flight.smoothing,
            SmoothingMode::PerFrame { .. }
        ));
        assert_eq!(args.render_config().fov_degrees, 90.0);
    }

    #[test]
    fn test_unknown_smoothing_rejected() {
        assert!(Args::try_parse_from(["synthflight", "--smoothing", "cubic"]).is_err());
    }
}
