//! Scheduling abstraction and the published-value cell.
//!
//! The processing step is scheduled cooperatively: one step per
//! ticker wait, never overlapping. Abstracting the wait lets the
//! same core run under a worker thread at a fixed rate, under a
//! host-driven per-frame callback, or fully manually in tests.

use crate::mixer::MotionVector;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Paces the per-frame processing loop.
pub trait Ticker: Send {
    /// Blocks until the next tick is due.
    fn wait(&mut self);
}

/// Fixed-rate ticker with drift compensation.
///
/// Deadlines advance by a fixed period from the previous deadline,
/// not from wakeup time, so a slow tick does not shift the schedule.
pub struct FixedRateTicker {
    period: Duration,
    deadline: Instant,
}

impl FixedRateTicker {
    /// Creates a ticker firing `rate` times per second.
    pub fn new(rate: f64) -> Self {
        let period = Duration::from_secs_f64(1.0 / rate.max(1.0));
        Self {
            period,
            deadline: Instant::now() + period,
        }
    }
}

impl Ticker for FixedRateTicker {
    fn wait(&mut self) {
        let now = Instant::now();
        if self.deadline > now {
            std::thread::sleep(self.deadline - now);
        }
        self.deadline += self.period;
        // If we are badly behind, resynchronize instead of bursting.
        if self.deadline < Instant::now() {
            self.deadline = Instant::now() + self.period;
        }
    }
}

/// Ticker that never waits; the host drives every step explicitly.
#[derive(Default)]
pub struct ManualTicker;

impl Ticker for ManualTicker {
    fn wait(&mut self) {}
}

/// Single-slot, single-writer/multi-reader cell holding the newest
/// published vector.
///
/// The writer always overwrites, never queues: a stale vector is
/// worthless, so backpressure is "drop stale, present newest".
#[derive(Debug, Default)]
pub struct MotionCell {
    slot: Mutex<MotionVector>,
}

impl MotionCell {
    /// Creates a cell holding the centered vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the slot with a newer vector.
    pub fn store(&self, vector: MotionVector) {
        match self.slot.lock() {
            Ok(mut slot) => *slot = vector,
            Err(poisoned) => *poisoned.into_inner() = vector,
        }
    }

    /// Reads the newest vector.
    pub fn load(&self) -> MotionVector {
        match self.slot.lock() {
            Ok(slot) => *slot,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_starts_centered() {
        let cell = MotionCell::new();
        assert_eq!(cell.load(), MotionVector::ZERO);
    }

    #[test]
    fn test_cell_overwrites() {
        let cell = MotionCell::new();
        cell.store(MotionVector { x: 0.5, y: -0.5 });
        cell.store(MotionVector { x: 0.1, y: 0.2 });

        let v = cell.load();
        assert_eq!(v.x, 0.1);
        assert_eq!(v.y, 0.2);
    }

    #[test]
    fn test_fixed_rate_ticker_paces() {
        let mut ticker = FixedRateTicker::new(200.0);
        let start = Instant::now();
        ticker.wait();
        ticker.wait();
        // Two 5ms periods; allow generous scheduling slack.
        assert!(start.elapsed() >= Duration::from_millis(8));
    }

    #[test]
    fn test_manual_ticker_never_blocks() {
        let mut ticker = ManualTicker;
        let start = Instant::now();
        for _ in 0..1000 {
            ticker.wait();
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
