//! Monotonic millisecond timer used around each timed pass.
//!
//! The timer is calibrated once from its [`Clock`]. A clock that cannot report
//! a tick frequency leaves the timer non-functional: every elapsed-time query
//! then returns `0.0` instead of failing the run.

use std::num::NonZeroU64;
use std::time::Instant;

/// A monotonic tick source.
pub trait Clock {
    /// Current tick count. Only differences between two readings matter.
    fn ticks(&self) -> u64;

    /// Ticks per second, or `None` when the source cannot be calibrated.
    fn ticks_per_second(&self) -> Option<NonZeroU64>;
}

/// [`Instant`]-backed clock counting nanoseconds since its creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    const NANOS_PER_SECOND: u64 = 1_000_000_000;

    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn ticks(&self) -> u64 {
        // u64 nanoseconds covers ~584 years of uptime.
        self.origin.elapsed().as_nanos() as u64
    }

    #[inline]
    fn ticks_per_second(&self) -> Option<NonZeroU64> {
        NonZeroU64::new(Self::NANOS_PER_SECOND)
    }
}

/// Reset-and-measure stopwatch over a [`Clock`].
///
/// ```rust
/// use fasttrig::timer::Timer;
///
/// let mut timer = Timer::new();
/// timer.reset();
/// let ms = timer.elapsed_ms();
/// assert!(ms >= 0.0);
/// ```
#[derive(Debug)]
pub struct Timer<C: Clock = MonotonicClock> {
    clock: C,
    ticks_per_second: Option<NonZeroU64>,
    start: u64,
}

impl Timer<MonotonicClock> {
    /// Creates a timer on the platform monotonic clock and starts it.
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for Timer<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Timer<C> {
    /// Creates a timer on `clock`, calibrates it, and starts it.
    pub fn with_clock(clock: C) -> Self {
        let ticks_per_second = clock.ticks_per_second();
        if ticks_per_second.is_none() {
            log::warn!("clock reports no tick frequency; all timings will read 0.0ms");
        }

        let start = clock.ticks();

        Self {
            clock,
            ticks_per_second,
            start,
        }
    }

    /// Whether elapsed-time queries return real measurements.
    pub fn is_functional(&self) -> bool {
        self.ticks_per_second.is_some()
    }

    /// Records the current tick count as the new reference point.
    #[inline]
    pub fn reset(&mut self) {
        self.start = self.clock.ticks();
    }

    /// Milliseconds elapsed since the last [`reset`](Self::reset), or `0.0`
    /// on a non-functional timer.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        let Some(ticks_per_second) = self.ticks_per_second else {
            return 0.0;
        };

        let now = self.clock.ticks();
        now.saturating_sub(self.start) as f64 * 1000.0 / ticks_per_second.get() as f64
    }
}
