//! One-Euro adaptive low-pass filter.
//!
//! A speed-adaptive low-pass: the cutoff frequency rises with the
//! estimated rate of change of the signal, so slow jitter is damped
//! hard while deliberate motion passes through with little lag.

/// Persistent state of a single-axis filter between samples.
#[derive(Debug, Clone, Copy)]
struct FilterState {
    last_value: f64,
    last_derivative: f64,
}

/// Single-axis One-Euro filter running at a fixed sample rate.
///
/// The very first sample seeds the state and passes through
/// unchanged, so there is no transient ramp-up on the initial frame.
#[derive(Debug, Clone)]
pub struct OneEuroFilter {
    /// Cutoff frequency floor in Hz.
    min_cutoff: f64,
    /// Speed coefficient: how fast the cutoff rises with derivative.
    beta: f64,
    /// Fixed cutoff for the derivative's own low-pass.
    d_cutoff: f64,
    /// Sample rate in Hz.
    rate: f64,
    state: Option<FilterState>,
}

impl OneEuroFilter {
    /// Default cutoff for the derivative low-pass.
    pub const DEFAULT_D_CUTOFF: f64 = 1.0;

    /// Creates a filter with the given tuning, sampling at `rate` Hz.
    pub fn new(min_cutoff: f64, beta: f64, rate: f64) -> Self {
        Self {
            min_cutoff: min_cutoff.max(1e-6),
            beta: beta.max(0.0),
            d_cutoff: Self::DEFAULT_D_CUTOFF,
            rate: rate.max(1e-6),
            state: None,
        }
    }

    /// Smoothing factor for a given cutoff frequency at this rate.
    fn alpha(&self, cutoff: f64) -> f64 {
        let tau = 1.0 / (2.0 * std::f64::consts::PI * cutoff);
        1.0 / (1.0 + tau * self.rate)
    }

    /// Filters one sample.
    pub fn filter(&mut self, x: f64) -> f64 {
        let state = match self.state {
            Some(s) => s,
            None => {
                // Pass-through seed: no initial-frame discontinuity.
                self.state = Some(FilterState {
                    last_value: x,
                    last_derivative: 0.0,
                });
                return x;
            }
        };

        let dx = (x - state.last_value) * self.rate;
        let alpha_d = self.alpha(self.d_cutoff);
        let derivative = alpha_d * dx + (1.0 - alpha_d) * state.last_derivative;

        // Cutoff rises with speed: more responsive under fast motion.
        let cutoff = self.min_cutoff + self.beta * derivative.abs();
        let alpha = self.alpha(cutoff);
        let value = alpha * x + (1.0 - alpha) * state.last_value;

        self.state = Some(FilterState {
            last_value: value,
            last_derivative: derivative,
        });
        value
    }

    /// Clears filter state; the next sample re-seeds.
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Returns true once the filter has been seeded.
    pub fn is_seeded(&self) -> bool {
        self.state.is_some()
    }
}
