//! Audio system managing soundtrack playback and FFT analysis.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use super::fft::spawn_analysis_thread;
use super::{AnalysisGraph, AudioFrame, FrequencyAnalyzer, GraphState, SoundtrackSource};
use crate::error::AudioError;
use crate::params::AnalyzerConfig;

/// Audio system managing playback and FFT analysis
///
/// The analysis graph is built suspended; `play` is the playback-start
/// signal that resumes it.
pub struct AudioSystem {
    /// Latest analysis frame (thread-safe)
    latest: Arc<Mutex<AudioFrame>>,

    graph: Arc<AnalysisGraph>,

    /// Gates the soundtrack; paused output is silence
    playing: Arc<AtomicBool>,

    /// FFT analysis thread handle (joined on drop)
    analysis_thread: Option<thread::JoinHandle<()>>,

    label: String,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Open the default output device and wire the soundtrack into analysis
    pub fn new(config: AnalyzerConfig, source: &SoundtrackSource) -> Result<Self, AudioError> {
        config.validate()?;

        // Setup audio output device
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let output_config = device.default_output_config()?;
        if output_config.sample_format() != cpal::SampleFormat::F32 {
            return Err(AudioError::UnsupportedSampleFormat(
                output_config.sample_format(),
            ));
        }

        let sample_rate = output_config.sample_rate().0;
        let channels = output_config.channels() as usize;
        log::info!(
            "Audio: {} @ {}Hz, {} ch",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate,
            channels
        );

        let mut soundtrack = source.load(sample_rate)?;
        let label = soundtrack.label().to_string();
        let tap = soundtrack.attach_tap(config.fft_size);

        let latest = Arc::new(Mutex::new(AudioFrame::default()));
        let graph = Arc::new(AnalysisGraph::new());
        let playing = Arc::new(AtomicBool::new(false));
        let playing_callback = Arc::clone(&playing);

        // Build audio output stream
        let stream = device.build_output_stream(
            &output_config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                if playing_callback.load(Ordering::Relaxed) {
                    soundtrack.render(data, channels);
                } else {
                    soundtrack.render_silence(data, channels);
                }
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )?;
        stream.play()?;

        // Start FFT analysis thread (idle until playback starts)
        let analysis_thread = spawn_analysis_thread(
            config,
            tap,
            Arc::clone(&latest),
            Arc::clone(&graph),
        )?;

        Ok(Self {
            latest,
            graph,
            playing,
            analysis_thread: Some(analysis_thread),
            label,
            _stream: stream,
        })
    }

    /// Render-side reader over this system's analysis output
    ///
    /// Every reader shares the one tap attached at construction.
    pub fn analyzer(&self) -> FrequencyAnalyzer {
        FrequencyAnalyzer::new(Arc::clone(&self.latest))
    }

    /// Start (or resume) the soundtrack
    pub fn play(&self) {
        self.playing.store(true, Ordering::Relaxed);
        if self.graph.resume() {
            log::info!("Analysis graph resumed");
        }
        log::info!("Playing {}", self.label);
    }

    /// Silence the soundtrack
    ///
    /// Analysis keeps running on the silent output so the ring decays to idle.
    pub fn pause(&self) {
        if self.playing.swap(false, Ordering::Relaxed) {
            log::info!("Paused");
        }
    }

    /// Toggle playback, returning whether it is now playing
    pub fn toggle(&self) -> bool {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
        self.is_playing()
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    pub fn graph_state(&self) -> GraphState {
        self.graph.state()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Drop for AudioSystem {
    fn drop(&mut self) {
        self.playing.store(false, Ordering::Relaxed);
        self.graph.close();
        if let Some(handle) = self.analysis_thread.take() {
            if handle.join().is_err() {
                log::warn!("Analysis thread panicked");
            }
        }
        log::debug!("Audio system closed");
    }
}
