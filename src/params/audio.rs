//! Frequency analysis configuration and constants.

use crate::error::ConfigError;

/// Number of frequency bins consumed by the spectrum ring (one bar per bin)
pub const SPECTRUM_BINS: usize = 16;

/// Frequency analysis configuration
///
/// Mirrors the byte-frequency semantics of a Web Audio `AnalyserNode`:
/// magnitudes are smoothed over time, converted to decibels and mapped
/// linearly from `[min_decibels, max_decibels]` onto `0..=255`.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// FFT window size (must be power of 2, and `fft_size / 2 == SPECTRUM_BINS`)
    pub fft_size: usize,

    /// Analysis update interval (milliseconds)
    /// 16 ≈ one analysis per 60 Hz frame
    pub update_interval_ms: u64,

    /// Temporal smoothing between consecutive analysis windows (0 = none, <1)
    pub smoothing_time_constant: f32,

    /// Magnitude (dB) that maps to byte value 0
    pub min_decibels: f32,

    /// Magnitude (dB) that maps to byte value 255
    pub max_decibels: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: SPECTRUM_BINS * 2, // 32-sample transform → 16 usable bins
            update_interval_ms: 16,
            smoothing_time_constant: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

impl AnalyzerConfig {
    /// Number of usable magnitude bins (below Nyquist)
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2 and match the ring)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fft_size.is_power_of_two() {
            return Err(ConfigError::FftSizeNotPowerOfTwo(self.fft_size));
        }
        if self.bin_count() != SPECTRUM_BINS {
            return Err(ConfigError::BinCountMismatch {
                fft_size: self.fft_size,
                bins: self.bin_count(),
                expected: SPECTRUM_BINS,
            });
        }
        ConfigError::check_range(
            "smoothing_time_constant",
            self.smoothing_time_constant,
            0.0,
            0.999,
        )?;
        if self.max_decibels <= self.min_decibels {
            return Err(ConfigError::OutOfRange {
                name: "max_decibels",
                value: self.max_decibels,
                min: self.min_decibels,
                max: 0.0,
            });
        }
        Ok(())
    }
}

/// Audio constants (compile-time, match Glicol engine setup)
pub mod audio_constants {
    /// Audio block size (samples per buffer)
    /// 128 = 2.9ms @ 44.1kHz
    pub const BLOCK_SIZE: usize = 128;

    /// Hard clip applied to everything sent to the speakers
    pub const OUTPUT_LIMIT: f32 = 0.5;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_ring() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.fft_size, 32);
        assert_eq!(config.bin_count(), SPECTRUM_BINS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_mismatched_fft_size() {
        let config = AnalyzerConfig {
            fft_size: 64,
            ..AnalyzerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BinCountMismatch {
                fft_size: 64,
                bins: 32,
                expected: SPECTRUM_BINS,
            })
        );
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        let config = AnalyzerConfig {
            fft_size: 30,
            ..AnalyzerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::FftSizeNotPowerOfTwo(30))
        );
    }
}
