//! Frame clock and tick gating.

use std::time::Instant;

/// Longest frame delta fed to a continuous update. Anything longer (a
/// stalled terminal, a suspended process) is treated as this long.
pub const MAX_FRAME_DELTA_MS: f64 = 250.0;

/// How a game wants its update step driven.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickPolicy {
    /// Advance only when more than `interval_ms` has passed since the last
    /// advance; other frames are skipped without touching state.
    Throttled { interval_ms: f64 },
    /// Advance every frame with the elapsed time.
    Continuous,
}

/// What a call to `run_frame` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Session is not running; nothing happened and nothing was rescheduled.
    Halted,
    /// Throttled frame: rescheduled without advancing.
    Skipped,
    /// State advanced and the next frame is scheduled.
    Advanced,
    /// State advanced and the run ended this frame.
    Finished,
}

impl FrameOutcome {
    pub fn needs_render(self) -> bool {
        matches!(self, FrameOutcome::Advanced | FrameOutcome::Finished)
    }
}

/// Remembers when the session last advanced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    last_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_ms(&self) -> f64 {
        self.last_ms
    }

    /// Restart timing from `now_ms` (run start, resume).
    pub fn restart(&mut self, now_ms: f64) {
        self.last_ms = now_ms;
    }

    /// Decide whether this frame advances. Returns the delta to feed the
    /// update step, and moves the clock forward when it does.
    pub fn gate(&mut self, now_ms: f64, policy: TickPolicy) -> Option<f64> {
        let dt = now_ms - self.last_ms;
        match policy {
            TickPolicy::Throttled { interval_ms } => {
                if dt > interval_ms {
                    self.last_ms = now_ms;
                    Some(dt)
                } else {
                    None
                }
            }
            TickPolicy::Continuous => {
                self.last_ms = now_ms;
                Some(dt.clamp(0.0, MAX_FRAME_DELTA_MS))
            }
        }
    }
}

/// Monotonic millisecond clock for the host loop.
#[derive(Debug, Clone, Copy)]
pub struct HostClock {
    origin: Instant,
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}
