//! Input mixing: camera flow, pointer and orientation fusion.
//!
//! The mixer owns all persistent per-axis state: the two-stage
//! smoothers, the decayed camera integrator, and the latest pointer
//! and orientation inputs. Each tick it converts the flow velocity
//! estimate into a bounded position signal and blends it with the
//! other inputs according to the platform profile.

mod orientation;
mod profile;

pub use orientation::{OrientationSample, FULL_SCALE_DEG};
pub use profile::{MotionProfile, Platform};

use crate::filter::AxisSmoother;
use crate::flow::FlowSample;

/// The final bounded vector published to subscribers.
///
/// Both components are always in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionVector {
    /// Horizontal displacement.
    pub x: f64,
    /// Vertical displacement.
    pub y: f64,
}

impl MotionVector {
    /// The centered (resting) vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

/// Fuses the smoothed camera signal with pointer and orientation
/// input according to the platform profile.
pub struct InputMixer {
    profile: MotionProfile,
    smooth_x: AxisSmoother,
    smooth_y: AxisSmoother,
    /// Decayed integrator state per axis, always in [-1, 1].
    camera_x: f64,
    camera_y: f64,
    /// Latest normalized pointer position.
    pointer_x: f64,
    pointer_y: f64,
    /// Latest orientation event; `None` until a platform delivers one.
    orientation: Option<OrientationSample>,
}

impl InputMixer {
    /// Creates a mixer for the given profile, sampling at `rate` Hz.
    pub fn new(profile: MotionProfile, rate: f64) -> Self {
        let smooth_x = AxisSmoother::new(
            profile.raw_smooth,
            profile.min_cutoff,
            profile.beta,
            rate,
        );
        let smooth_y = smooth_x.clone();
        Self {
            profile,
            smooth_x,
            smooth_y,
            camera_x: 0.0,
            camera_y: 0.0,
            pointer_x: 0.0,
            pointer_y: 0.0,
            orientation: None,
        }
    }

    /// Returns the active profile.
    pub fn profile(&self) -> &MotionProfile {
        &self.profile
    }

    /// Records the latest pointer position, normalized to [-1, 1].
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer_x = x.clamp(-1.0, 1.0);
        self.pointer_y = y.clamp(-1.0, 1.0);
    }

    /// Records the latest device-orientation sample.
    pub fn set_orientation(&mut self, sample: OrientationSample) {
        self.orientation = Some(sample);
    }

    /// Advances one tick with the given flow sample and returns the
    /// blended, clamped output vector.
    pub fn update(&mut self, flow: FlowSample) -> MotionVector {
        let sx = self.smooth_x.smooth(flow.dx);
        let sy = self.smooth_y.smooth(flow.dy);
        let fx = self.dead_zone(sx);
        let fy = self.dead_zone(sy);

        let p = &self.profile;
        self.camera_x =
            (self.camera_x * p.decay + fx * p.sensitivity * p.input_mix).clamp(-1.0, 1.0);
        self.camera_y =
            (self.camera_y * p.decay + fy * p.sensitivity * p.input_mix).clamp(-1.0, 1.0);

        self.blend()
    }

    /// Forces sub-perceptual values to exactly zero so they never
    /// accumulate into the integrator.
    fn dead_zone(&self, v: f64) -> f64 {
        if v.abs() < self.profile.dead_zone {
            0.0
        } else {
            v
        }
    }

    /// Blends the current persistent state into the output vector.
    fn blend(&self) -> MotionVector {
        let p = &self.profile;

        let (x, y) = if p.mix_mouse {
            // Desktop: weighted pointer/camera blend; with x_only the
            // Y axis is pointer-only.
            let x = self.camera_x * p.camera_weight + self.pointer_x * p.mouse_weight;
            let y = if p.x_only {
                self.pointer_y
            } else {
                self.camera_y * p.camera_weight + self.pointer_y * p.mouse_weight
            };
            (x, y)
        } else {
            // Mobile: tilt folds additively into the camera channel,
            // X-dominant. Without orientation events the pointer
            // position substitutes.
            let (tilt_x, tilt_y) = match self.orientation {
                Some(o) => (o.tilt_x(), o.tilt_y()),
                None => (self.pointer_x, self.pointer_y),
            };
            let x = self.camera_x + tilt_x;
            let y = if p.x_only {
                tilt_y
            } else {
                self.camera_y + tilt_y
            };
            (x, y)
        };

        MotionVector {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        }
    }

    /// Current output without advancing state.
    pub fn current(&self) -> MotionVector {
        self.blend()
    }

    /// Clears all persistent state back to center.
    pub fn reset(&mut self) {
        self.smooth_x.reset();
        self.smooth_y.reset();
        self.camera_x = 0.0;
        self.camera_y = 0.0;
        self.pointer_x = 0.0;
        self.pointer_y = 0.0;
        self.orientation = None;
    }

    #[cfg(test)]
    fn force_camera(&mut self, x: f64, y: f64) {
        self.camera_x = x;
        self.camera_y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RATE: f64 = 60.0;

    #[test]
    fn test_desktop_blend_example() {
        let mut mixer = InputMixer::new(MotionProfile::desktop(), RATE);
        mixer.force_camera(0.5, 0.0);
        mixer.set_pointer(-0.2, 0.0);

        // 0.5 * 0.3 + (-0.2) * 0.7 = 0.01
        let v = mixer.current();
        assert!((v.x - 0.01).abs() < 1e-9, "x = {}", v.x);
    }

    #[test]
    fn test_desktop_x_only_substitutes_pointer_y() {
        let mut mixer = InputMixer::new(MotionProfile::desktop(), RATE);
        mixer.force_camera(0.0, 0.8);
        mixer.set_pointer(0.0, -0.4);

        let v = mixer.current();
        assert!((v.y - -0.4).abs() < 1e-9, "y = {}", v.y);
    }

    #[test]
    fn test_mobile_orientation_saturates_x() {
        let mut mixer = InputMixer::new(MotionProfile::mobile(), RATE);
        mixer.set_orientation(OrientationSample::new(90.0, 45.0));

        let v = mixer.update(FlowSample::ZERO);
        assert_eq!(v.x, 1.0);
        assert!(v.y <= 1.0);
    }

    #[test]
    fn test_mobile_without_orientation_uses_pointer() {
        let mut mixer = InputMixer::new(MotionProfile::mobile(), RATE);
        mixer.set_pointer(0.6, -0.3);

        let v = mixer.update(FlowSample::ZERO);
        assert!((v.x - 0.6).abs() < 1e-9);
        assert!((v.y - -0.3).abs() < 1e-9);
    }

    #[test]
    fn test_dead_zone_contributes_nothing() {
        let profile = MotionProfile::desktop();
        let mut mixer = InputMixer::new(profile.clone(), RATE);

        // Flow small enough that the smoothed value stays under the
        // dead zone; the integrator must remain exactly zero.
        let tiny = FlowSample {
            dx: profile.dead_zone * 0.5,
            dy: 0.0,
        };
        for _ in 0..50 {
            mixer.update(tiny);
        }
        assert_eq!(mixer.camera_x, 0.0);
        assert_eq!(mixer.camera_y, 0.0);
    }

    #[test]
    fn test_integrator_decays_toward_center() {
        let mut mixer = InputMixer::new(MotionProfile::mobile(), RATE);
        mixer.force_camera(1.0, -1.0);

        for _ in 0..200 {
            mixer.update(FlowSample::ZERO);
        }
        assert!(mixer.camera_x.abs() < 1e-3);
        assert!(mixer.camera_y.abs() < 1e-3);
    }

    #[test]
    fn test_sustained_flow_saturates_integrator() {
        let mut mixer = InputMixer::new(MotionProfile::desktop(), RATE);
        let strong = FlowSample { dx: 0.2, dy: 0.0 };

        for _ in 0..100 {
            mixer.update(strong);
        }
        assert_eq!(mixer.camera_x, 1.0);
    }

    #[test]
    fn test_reset_recenters() {
        let mut mixer = InputMixer::new(MotionProfile::desktop(), RATE);
        mixer.set_pointer(0.9, 0.9);
        mixer.update(FlowSample { dx: 0.1, dy: 0.1 });

        mixer.reset();
        assert_eq!(mixer.current(), MotionVector::ZERO);
    }

    proptest! {
        /// Boundedness: whatever the inputs, the published vector
        /// stays inside [-1, 1] on both axes.
        #[test]
        fn prop_output_always_bounded(
            flows in proptest::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 1..64),
            px in -5.0f64..5.0,
            py in -5.0f64..5.0,
            beta in -360.0f64..360.0,
            gamma in -360.0f64..360.0,
            mobile in proptest::bool::ANY,
        ) {
            let profile = if mobile {
                MotionProfile::mobile()
            } else {
                MotionProfile::desktop()
            };
            let mut mixer = InputMixer::new(profile, RATE);
            mixer.set_pointer(px, py);
            mixer.set_orientation(OrientationSample::new(beta, gamma));

            for (dx, dy) in flows {
                let v = mixer.update(FlowSample { dx, dy });
                prop_assert!((-1.0..=1.0).contains(&v.x));
                prop_assert!((-1.0..=1.0).contains(&v.y));
            }
        }
    }
}
