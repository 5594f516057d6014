//! Two-stage per-axis smoothing.
//!
//! Raw optical-flow samples are noisy frame to frame. Stage one is a
//! plain exponential smoother that knocks down per-frame jitter;
//! stage two is the One-Euro filter, which adapts its cutoff to the
//! speed of the signal.

use super::one_euro::OneEuroFilter;

/// Smoothing pipeline for one axis of the flow signal.
#[derive(Debug, Clone)]
pub struct AxisSmoother {
    /// Exponential smoothing factor for the raw stage.
    raw_alpha: f64,
    /// Raw-stage accumulator.
    raw: f64,
    adaptive: OneEuroFilter,
}

impl AxisSmoother {
    /// Creates a smoother with the given raw-stage alpha and One-Euro
    /// tuning, sampling at `rate` Hz.
    pub fn new(raw_alpha: f64, min_cutoff: f64, beta: f64, rate: f64) -> Self {
        Self {
            raw_alpha: raw_alpha.clamp(0.0, 1.0),
            raw: 0.0,
            adaptive: OneEuroFilter::new(min_cutoff, beta, rate),
        }
    }

    /// Smooths one flow sample.
    pub fn smooth(&mut self, x: f64) -> f64 {
        self.raw = self.raw * (1.0 - self.raw_alpha) + x * self.raw_alpha;
        self.adaptive.filter(self.raw)
    }

    /// Clears both stages.
    pub fn reset(&mut self) {
        self.raw = 0.0;
        self.adaptive.reset();
    }
}
