//! Device-orientation input normalization.

/// Tilt angle in degrees that maps to a full-scale ±1.0 output.
pub const FULL_SCALE_DEG: f64 = 45.0;

/// A device-orientation event in degrees.
///
/// `beta` is front-back tilt (device pitch), `gamma` is left-right
/// tilt (device roll) — the axes reported by host orientation events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationSample {
    /// Front-back tilt in degrees.
    pub beta: f64,
    /// Left-right tilt in degrees.
    pub gamma: f64,
}

impl OrientationSample {
    /// Creates a sample from raw event angles.
    pub fn new(beta: f64, gamma: f64) -> Self {
        Self { beta, gamma }
    }

    /// Normalized X tilt: gamma against the full-scale angle,
    /// clamped to [-1, 1]. This is the dominant channel.
    pub fn tilt_x(&self) -> f64 {
        (self.gamma / FULL_SCALE_DEG).clamp(-1.0, 1.0)
    }

    /// Normalized Y tilt: beta against twice the full-scale angle,
    /// clamped to [-1, 1]. Deliberately weaker than X; pitch swings
    /// far more during normal handling than roll does.
    pub fn tilt_y(&self) -> f64 {
        (self.beta / (2.0 * FULL_SCALE_DEG)).clamp(-1.0, 1.0)
    }
}
