//! Shared state between the audio callback, the analysis thread and the
//! render loop.
//!
//! Single writer, single reader on each buffer; readers take a copy and
//! stale reads are fine.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, TryLockError};

use super::AudioFrame;

/// Most recent mono samples sent to the speakers
#[derive(Debug)]
pub struct SampleTap {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl SampleTap {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Copy the newest samples into `out`, oldest first
    ///
    /// Missing history (right after start-up) is zero-filled at the front.
    pub fn copy_latest(&self, out: &mut [f32]) {
        let available = self.samples.len().min(out.len());
        let pad = out.len() - available;
        out[..pad].fill(0.0);
        let skip = self.samples.len() - available;
        for (slot, &sample) in out[pad..].iter_mut().zip(self.samples.iter().skip(skip)) {
            *slot = sample;
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Lifecycle of the analysis graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphState {
    /// Built but idle until playback starts
    Suspended,
    Running,
    /// Torn down; never runs again
    Closed,
}

/// Run state shared with the analysis thread
#[derive(Debug)]
pub struct AnalysisGraph {
    state: AtomicU8,
}

impl Default for AnalysisGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisGraph {
    const SUSPENDED: u8 = 0;
    const RUNNING: u8 = 1;
    const CLOSED: u8 = 2;

    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(Self::SUSPENDED),
        }
    }

    pub fn state(&self) -> GraphState {
        match self.state.load(Ordering::Acquire) {
            Self::SUSPENDED => GraphState::Suspended,
            Self::RUNNING => GraphState::Running,
            _ => GraphState::Closed,
        }
    }

    /// Resume a suspended graph (playback-start signal)
    ///
    /// # Returns
    /// Whether the graph transitioned from suspended to running
    pub fn resume(&self) -> bool {
        self.state
            .compare_exchange(
                Self::SUSPENDED,
                Self::RUNNING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    pub fn close(&self) {
        self.state.store(Self::CLOSED, Ordering::Release);
    }
}

/// Render-side view of the latest analysis window
///
/// Degrades to an all-zero frame when no audio graph exists.
#[derive(Debug, Clone, Default)]
pub struct FrequencyAnalyzer {
    latest: Option<Arc<Mutex<AudioFrame>>>,
    last: AudioFrame,
}

impl FrequencyAnalyzer {
    /// Reader over a frame published by an analysis thread
    pub fn new(latest: Arc<Mutex<AudioFrame>>) -> Self {
        Self {
            latest: Some(latest),
            last: AudioFrame::default(),
        }
    }

    /// Analyzer with no audio behind it (flat, idle ring)
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.latest.is_some()
    }

    /// Latest analysis frame, never blocking
    ///
    /// If the writer holds the lock right now the previous frame is returned.
    pub fn current_frame(&mut self) -> AudioFrame {
        if let Some(latest) = &self.latest {
            match latest.try_lock() {
                Ok(frame) => self.last = *frame,
                Err(TryLockError::Poisoned(poisoned)) => self.last = *poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => {}
            }
        }
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SPECTRUM_BINS;

    #[test]
    fn test_tap_keeps_only_latest_window() {
        let mut tap = SampleTap::new(4);
        for i in 0..10 {
            tap.push(i as f32);
        }
        assert_eq!(tap.len(), 4);

        let mut out = [0.0; 4];
        tap.copy_latest(&mut out);
        assert_eq!(out, [6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_tap_zero_pads_short_history() {
        let mut tap = SampleTap::new(4);
        tap.push(1.0);
        tap.push(2.0);

        let mut out = [9.0; 4];
        tap.copy_latest(&mut out);
        assert_eq!(out, [0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_graph_lifecycle() {
        let graph = AnalysisGraph::new();
        assert_eq!(graph.state(), GraphState::Suspended);

        assert!(graph.resume());
        assert!(!graph.resume()); // already running
        assert_eq!(graph.state(), GraphState::Running);

        graph.close();
        assert!(!graph.resume());
        assert_eq!(graph.state(), GraphState::Closed);
    }

    #[test]
    fn test_unavailable_analyzer_yields_silence() {
        let mut analyzer = FrequencyAnalyzer::unavailable();
        assert!(!analyzer.is_available());
        assert!(analyzer.current_frame().is_silent());
    }

    #[test]
    fn test_analyzer_reads_latest_value() {
        let shared = Arc::new(Mutex::new(AudioFrame::default()));
        let mut analyzer = FrequencyAnalyzer::new(Arc::clone(&shared));

        *shared.lock().unwrap() = AudioFrame::new([10; SPECTRUM_BINS]);
        *shared.lock().unwrap() = AudioFrame::new([42; SPECTRUM_BINS]);
        assert_eq!(analyzer.current_frame().bins()[0], 42);
    }

    #[test]
    fn test_analyzer_returns_previous_frame_while_locked() {
        let shared = Arc::new(Mutex::new(AudioFrame::new([7; SPECTRUM_BINS])));
        let mut analyzer = FrequencyAnalyzer::new(Arc::clone(&shared));
        assert_eq!(analyzer.current_frame().bins()[3], 7);

        let mut guard = shared.lock().unwrap();
        *guard = AudioFrame::new([99; SPECTRUM_BINS]);
        // Writer still holds the lock: stale read, no blocking
        assert_eq!(analyzer.current_frame().bins()[3], 7);
        drop(guard);

        assert_eq!(analyzer.current_frame().bins()[3], 99);
    }
}
