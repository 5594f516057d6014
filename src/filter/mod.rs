//! Adaptive smoothing of the raw flow signal.

mod one_euro;
mod smoother;

pub use one_euro::OneEuroFilter;
pub use smoother::AxisSmoother;
