//! Soundtrack playback and real-time frequency analysis.
//!
//! Plays a WAV file (or a procedural Glicol composition) through `cpal`,
//! taps the output into a small FFT window and publishes byte-scaled bin
//! energies for the spectrum ring.

mod analyzer;
mod fft;
mod soundtrack;
mod system;

// Re-export public types
pub use analyzer::{AnalysisGraph, FrequencyAnalyzer, GraphState, SampleTap};
pub use fft::{blackman_window, magnitude_to_byte, SpectrumAnalysis};
pub use soundtrack::{Soundtrack, SoundtrackSource};
pub use system::AudioSystem;

use crate::params::SPECTRUM_BINS;

/// Byte-scaled energy of each frequency bin for one rendered frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioFrame {
    bins: [u8; SPECTRUM_BINS],
}

impl Default for AudioFrame {
    fn default() -> Self {
        Self {
            bins: [0; SPECTRUM_BINS],
        }
    }
}

impl AudioFrame {
    pub fn new(bins: [u8; SPECTRUM_BINS]) -> Self {
        Self { bins }
    }

    pub fn bins(&self) -> &[u8; SPECTRUM_BINS] {
        &self.bins
    }

    pub fn is_silent(&self) -> bool {
        self.bins.iter().all(|&b| b == 0)
    }

    /// Mean bin energy in [0, 1]
    pub fn level(&self) -> f32 {
        self.bins.iter().map(|&b| b as f32).sum::<f32>() / (255.0 * SPECTRUM_BINS as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_frame_is_silent() {
        let frame = AudioFrame::default();
        assert!(frame.is_silent());
        assert_eq!(frame.level(), 0.0);
        assert_eq!(frame.bins().len(), SPECTRUM_BINS);
    }

    #[test]
    fn test_level_of_full_frame() {
        let frame = AudioFrame::new([255; SPECTRUM_BINS]);
        assert!(!frame.is_silent());
        assert!((frame.level() - 1.0).abs() < 1e-6);
    }
}
