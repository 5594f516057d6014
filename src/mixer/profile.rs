//! Per-platform tuning profiles.
//!
//! All values here are empirical calibration per device class, kept
//! as configuration data. Desktop blends the camera signal with
//! pointer position; mobile leans on device orientation and a
//! smaller grid to stay inside the frame budget on low-power devices.

use serde::{Deserialize, Serialize};

/// Platform class the engine is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Wide viewport, pointer available.
    Desktop,
    /// Narrow viewport and/or mobile user agent; orientation available.
    Mobile,
}

/// User-agent substrings that indicate a mobile device.
const MOBILE_UA_TOKENS: &[&str] = &["Mobi", "Android", "iPhone", "iPad"];

/// Viewport width below which a device is treated as mobile.
const MOBILE_VIEWPORT_WIDTH: u32 = 820;

impl Platform {
    /// Classifies a platform from viewport width and user-agent signals.
    pub fn detect(viewport_width: u32, user_agent: &str) -> Self {
        let mobile_ua = MOBILE_UA_TOKENS.iter().any(|t| user_agent.contains(t));
        if viewport_width < MOBILE_VIEWPORT_WIDTH || mobile_ua {
            Platform::Mobile
        } else {
            Platform::Desktop
        }
    }

    /// Returns the built-in tuning profile for this platform.
    pub fn profile(self) -> MotionProfile {
        match self {
            Platform::Desktop => MotionProfile::desktop(),
            Platform::Mobile => MotionProfile::mobile(),
        }
    }
}

/// Tuning profile for one platform class.
///
/// Selected once at engine construction; every field can be
/// overridden from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionProfile {
    /// Analysis grid side length.
    pub size: usize,
    /// Scale from filtered flow velocity to integrator input.
    pub sensitivity: f64,
    /// Filtered values below this magnitude are forced to zero.
    pub dead_zone: f64,
    /// Per-tick integrator decay toward center (slightly below 1).
    pub decay: f64,
    /// Weight of the camera signal entering the integrator.
    pub input_mix: f64,
    /// Exponential smoothing alpha for the raw flow stage.
    pub raw_smooth: f64,
    /// One-Euro speed coefficient.
    pub beta: f64,
    /// One-Euro minimum cutoff frequency in Hz.
    pub min_cutoff: f64,
    /// Restrict the camera contribution to the X axis; the Y axis is
    /// substituted from pointer (desktop) or tilt (mobile).
    pub x_only: bool,
    /// Blend pointer position into the output.
    pub mix_mouse: bool,
    /// Pointer weight in the desktop blend (sums to 1.0 with camera).
    pub mouse_weight: f64,
    /// Camera weight in the desktop blend.
    pub camera_weight: f64,
}

impl MotionProfile {
    /// Desktop calibration: pointer-dominant blend, fine dead zone.
    pub fn desktop() -> Self {
        Self {
            size: 32,
            sensitivity: 8.0,
            dead_zone: 0.002,
            decay: 0.95,
            input_mix: 1.0,
            raw_smooth: 0.3,
            beta: 0.04,
            min_cutoff: 1.0,
            x_only: true,
            mix_mouse: true,
            mouse_weight: 0.7,
            camera_weight: 0.3,
        }
    }

    /// Mobile calibration: smaller grid, orientation folded into the
    /// camera channel, heavier damping.
    pub fn mobile() -> Self {
        Self {
            size: 24,
            sensitivity: 10.0,
            dead_zone: 0.004,
            decay: 0.92,
            input_mix: 1.0,
            raw_smooth: 0.4,
            beta: 0.06,
            min_cutoff: 0.8,
            x_only: true,
            mix_mouse: false,
            mouse_weight: 0.0,
            camera_weight: 1.0,
        }
    }
}
