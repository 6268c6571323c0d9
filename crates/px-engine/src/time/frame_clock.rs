use std::time::{Duration, Instant};

/// Timing of one frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Seconds since the clock started (or was last reset). Sum of clamped deltas.
    pub elapsed: f64,

    /// Zero-based frame counter.
    pub frame: u64,
}

/// Per-window frame clock.
///
/// Deltas are clamped so a stall (debugger, minimised window, device rebuild)
/// does not show up as one huge step in animations.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: f64,
    frame: u64,
    clamp: (Duration, Duration),
}

impl FrameClock {
    pub const MIN_DT: Duration = Duration::from_micros(100);
    pub const MAX_DT: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::with_clamps(Self::MIN_DT, Self::MAX_DT)
    }

    pub fn with_clamps(min: Duration, max: Duration) -> Self {
        debug_assert!(min <= max);
        Self {
            last: Instant::now(),
            elapsed: 0.0,
            frame: 0,
            clamp: (min, max),
        }
    }

    /// Restarts the delta baseline. Elapsed time and the frame counter are kept.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = self.advance(now.saturating_duration_since(self.last));
        self.last = now;
        dt
    }

    fn advance(&mut self, raw: Duration) -> FrameTime {
        let (min, max) = self.clamp;
        let dt = raw.clamp(min, max);
        self.elapsed += dt.as_secs_f64();

        let time = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed,
            frame: self.frame,
        };
        self.frame = self.frame.wrapping_add(1);
        time
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
