//! Tick sources driving the animation engine.
//!
//! The engine never reads a clock. It asks a [`TickSource`] how many ticks are due and performs
//! that many atomic units of work. The terminal front-end uses [`IntervalTicks`], tests use
//! [`ManualTicks`] to drive the engine synchronously.

use std::time::{Duration, Instant};

/// Upper bound on the ticks an interval source reports per poll.
///
/// A frame delayed far beyond the tick period (e.g. a suspended terminal) would otherwise flush the
/// whole backlog at once.
pub const MAX_CATCH_UP: usize = 64;

/// A periodic trigger the engine polls between frames.
pub trait TickSource {
    /// Returns how many ticks have become due since the previous call and consumes them.
    fn due(&mut self) -> usize;
}

/// Wall-clock tick source firing once per fixed period.
///
/// Whole periods are counted from the last consumed tick rather than from the poll time, so a
/// late poll reports every tick it missed, up to [`MAX_CATCH_UP`].
#[derive(Clone, Copy, Debug)]
pub struct IntervalTicks {
    /// Time between two ticks.
    period: Duration,
    /// Instant of the last consumed tick.
    last_tick: Instant,
    /// Whether ticking is suspended.
    paused: bool,
}

impl IntervalTicks {
    /// Creates a source whose first tick is due one period from now.
    pub fn new(period: Duration) -> Self {
        Self::starting_at(period, Instant::now())
    }

    /// Creates a source whose tick count starts at `origin`.
    pub const fn starting_at(period: Duration, origin: Instant) -> Self {
        Self {
            period,
            last_tick: origin,
            paused: false,
        }
    }

    /// Time between two ticks.
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Suspends ticking. Time spent paused is never reported.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes ticking, with the next tick due one period from now.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last_tick = Instant::now();
        }
    }

    /// Tells whether ticking is suspended.
    pub const fn is_paused(&self) -> bool {
        self.paused
    }
}

impl TickSource for IntervalTicks {
    fn due(&mut self) -> usize {
        if self.paused {
            return 0;
        }

        let now = Instant::now();
        let mut due = 0;
        while due < MAX_CATCH_UP {
            match self.last_tick.checked_add(self.period) {
                Some(next) if next <= now => {
                    self.last_tick = next;
                    due += 1;
                }
                _ => return due,
            }
        }

        // Drop the rest of the backlog.
        self.last_tick = now;
        due
    }
}

/// Tick source fired by hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualTicks {
    /// Ticks fired but not yet consumed.
    pending: usize,
}

impl ManualTicks {
    /// Creates a source with no pending ticks.
    pub const fn new() -> Self {
        Self { pending: 0 }
    }

    /// Queues `count` ticks for the next poll.
    pub fn fire(&mut self, count: usize) {
        self.pending = self.pending.saturating_add(count);
    }

    /// Number of ticks waiting to be consumed.
    pub const fn pending(&self) -> usize {
        self.pending
    }
}

impl TickSource for ManualTicks {
    fn due(&mut self) -> usize {
        std::mem::take(&mut self.pending)
    }
}
