use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

#[derive(Debug, Clone)]
enum Source {
    /// Wall clock with clamped deltas.
    Wall { last: Instant, dt_min: Duration, dt_max: Duration },
    /// Every tick reports the same delta (headless runs, tests).
    Fixed { step: Duration },
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Wall-clock deltas are clamped so a debugger pause or a minimized window
/// does not hand a multi-second `dt` to `enter_frame` listeners.
#[derive(Debug, Clone)]
pub struct FrameClock {
    source: Source,
    frame_index: u64,
}

impl FrameClock {
    /// Creates a wall clock with default clamps (0.1 ms .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a wall clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            source: Source::Wall { last: Instant::now(), dt_min, dt_max },
            frame_index: 0,
        }
    }

    /// Creates a clock that advances by exactly `step` every tick.
    pub fn fixed(step: Duration) -> Self {
        Self {
            source: Source::Fixed { step },
            frame_index: 0,
        }
    }

    /// Resets the wall-clock baseline. No effect on fixed clocks.
    pub fn reset(&mut self) {
        if let Source::Wall { last, .. } = &mut self.source {
            *last = Instant::now();
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();

        let dt = match &mut self.source {
            Source::Wall { last, dt_min, dt_max } => {
                let dt = now.saturating_duration_since(*last).clamp(*dt_min, *dt_max);
                *last = now;
                dt
            }
            Source::Fixed { step } => *step,
        };

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
