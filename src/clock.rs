//! Frame clock: elapsed time and a sanitized per-frame delta.

use std::time::Instant;

use crate::params::ClockConfig;

/// Time inputs for one simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since simulation start
    pub elapsed_s: f32,

    /// Seconds since the previous tick, within `[0, max_delta]`
    pub delta_s: f32,
}

impl FrameTime {
    /// Build a frame time, clamping a degenerate delta
    ///
    /// Negative or non-finite deltas become 0, oversized ones `max_delta_s`.
    pub fn new(elapsed_s: f32, delta_s: f32, max_delta_s: f32) -> Self {
        let delta_s = if delta_s.is_finite() {
            delta_s.clamp(0.0, max_delta_s)
        } else {
            0.0
        };
        Self { elapsed_s, delta_s }
    }

    /// Fixed-rate time sequence (for recording-style stepping and tests)
    ///
    /// Frame 0 has zero delta.
    pub fn fixed_rate(frame: u32, fps: f32) -> Self {
        let dt = 1.0 / fps;
        Self {
            elapsed_s: frame as f32 * dt,
            delta_s: if frame == 0 { 0.0 } else { dt },
        }
    }
}

/// Wall clock driving the render loop
pub struct FrameClock {
    start: Instant,
    last: Option<Instant>,
    config: ClockConfig,
}

impl FrameClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            start: Instant::now(),
            last: None,
            config,
        }
    }

    /// Sample the clock; the first call yields a zero delta
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let raw_delta = self
            .last
            .map(|last| (now - last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);

        if raw_delta > self.config.max_delta_s {
            log::debug!(
                "Clamping frame delta {:.3}s to {:.3}s",
                raw_delta,
                self.config.max_delta_s
            );
        }

        FrameTime::new(
            (now - self.start).as_secs_f32(),
            raw_delta,
            self.config.max_delta_s,
        )
    }

    /// Restart from `t = 0` with a zero delta on the next tick
    ///
    /// Call once the window and GPU are ready so setup time is not flown.
    pub fn restart(&mut self) {
        self.start = Instant::now();
        self.last = None;
    }
}
