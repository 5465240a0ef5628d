//! FFT analysis thread and utilities.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::{AnalysisGraph, AudioFrame, GraphState, SampleTap};
use crate::error::AudioError;
use crate::params::{AnalyzerConfig, SPECTRUM_BINS};

/// Blackman window function for FFT analysis (periodic form)
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let phase = 2.0 * PI * index as f32 / size as f32;
    0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos()
}

/// Map a linear magnitude onto a byte via its decibel level
///
/// `min_db` maps to 0 and `max_db` to 255; values outside are clamped and
/// silence (magnitude 0) is 0.
pub fn magnitude_to_byte(magnitude: f32, min_db: f32, max_db: f32) -> u8 {
    let db = 20.0 * magnitude.log10();
    let scaled = 255.0 * (db - min_db) / (max_db - min_db);
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}

/// Windowed FFT with temporal smoothing across windows
pub struct SpectrumAnalysis {
    config: AnalyzerConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,

    /// Smoothed linear magnitude per bin
    smoothed: [f32; SPECTRUM_BINS],
}

impl SpectrumAnalysis {
    pub fn new(config: AnalyzerConfig) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.fft_size);
        let window = (0..config.fft_size)
            .map(|i| blackman_window(i, config.fft_size))
            .collect();
        let buffer = vec![Complex::new(0.0, 0.0); config.fft_size];

        Self {
            config,
            fft,
            window,
            buffer,
            smoothed: [0.0; SPECTRUM_BINS],
        }
    }

    /// Analyze the newest `fft_size` samples and return the byte frame
    ///
    /// Shorter input is zero-padded at the front.
    pub fn process(&mut self, samples: &[f32]) -> AudioFrame {
        let size = self.config.fft_size;
        let start = samples.len().saturating_sub(size);
        let recent = &samples[start..];
        let pad = size - recent.len();

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }
        self.fft.process(&mut self.buffer);

        let tau = self.config.smoothing_time_constant;
        let mut bins = [0u8; SPECTRUM_BINS];
        for (k, byte) in bins.iter_mut().enumerate() {
            let magnitude = self.buffer[k].norm() / size as f32;
            self.smoothed[k] = tau * self.smoothed[k] + (1.0 - tau) * magnitude;
            *byte = magnitude_to_byte(
                self.smoothed[k],
                self.config.min_decibels,
                self.config.max_decibels,
            );
        }
        AudioFrame::new(bins)
    }

    /// Forget smoothing history
    pub fn reset(&mut self) {
        self.smoothed = [0.0; SPECTRUM_BINS];
    }
}

/// Spawn the analysis thread
///
/// Runs until the graph is closed; idles while it is suspended.
pub fn spawn_analysis_thread(
    config: AnalyzerConfig,
    tap: Arc<Mutex<SampleTap>>,
    latest: Arc<Mutex<AudioFrame>>,
    graph: Arc<AnalysisGraph>,
) -> Result<thread::JoinHandle<()>, AudioError> {
    thread::Builder::new()
        .name("spectrum-analysis".into())
        .spawn(move || {
            let interval = Duration::from_millis(config.update_interval_ms);
            let mut samples = vec![0.0; config.fft_size];
            let mut analysis = SpectrumAnalysis::new(config);

            loop {
                thread::sleep(interval);

                match graph.state() {
                    GraphState::Closed => break,
                    GraphState::Suspended => continue,
                    GraphState::Running => {}
                }

                match tap.lock() {
                    Ok(tap) => tap.copy_latest(&mut samples),
                    Err(_) => {
                        log::error!("Sample tap poisoned; stopping analysis");
                        break;
                    }
                }

                let frame = analysis.process(&samples);
                if let Ok(mut latest) = latest.lock() {
                    *latest = frame;
                }
            }
            log::debug!("Analysis thread exited");
        })
        .map_err(AudioError::AnalysisThread)
}
