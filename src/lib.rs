//! Motion-Input Fusion Engine
//!
//! Turns a very-low-resolution live camera feed into a smoothed,
//! bounded 2D displacement signal for driving visual parallax, and
//! blends it with pointer and device-orientation input per platform.
//!
//! # Architecture
//!
//! The system follows an explicit per-frame data flow:
//!
//! ```text
//! capture → flow (grid → edges → block match) → filter → mixer
//!                                                          ↓
//!                                              engine (hub / fan-out)
//! ```
//!
//! # Design Principles
//!
//! - **Lazy hardware**: the camera is acquired for the first
//!   subscriber and released with the last; nothing else holds it
//! - **Transient frames**: each frame is reduced to a tiny grayscale
//!   grid and discarded; no image data is stored or transmitted
//! - **Bounded output**: the published vector is always in [-1, 1]
//!   on both axes
//! - **Degrades, never throws**: denied cameras, textureless frames
//!   and first-sample filters are all defined, non-error paths
//!
//! # Example
//!
//! ```
//! use motion_fusion::{
//!     capture::SyntheticSource,
//!     engine::{EngineConfig, MotionCallback, MotionEngine, Scheduling},
//! };
//! use std::sync::Arc;
//!
//! let config = EngineConfig {
//!     scheduling: Scheduling::Manual,
//!     ..EngineConfig::desktop()
//! };
//! let engine = MotionEngine::new(config, Box::new(SyntheticSource::with_drift(2.0, 0.0)));
//!
//! let consumer: MotionCallback = Arc::new(|x, y| {
//!     assert!((-1.0..=1.0).contains(&x));
//!     assert!((-1.0..=1.0).contains(&y));
//! });
//!
//! // First subscriber acquires the camera and enables the engine.
//! engine.subscribe(Arc::clone(&consumer));
//! assert!(engine.enabled());
//!
//! for _ in 0..10 {
//!     engine.tick_once();
//! }
//!
//! // Last unsubscribe releases the camera.
//! engine.unsubscribe(&consumer);
//! assert!(!engine.enabled());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod capture;
pub mod engine;
pub mod filter;
pub mod flow;
pub mod metrics;
pub mod mixer;

// Re-export commonly used types at crate root
pub use capture::{CaptureConfig, FileConfig, FrameSource, RawFrame, SyntheticSource};
pub use engine::{EngineConfig, EngineError, MotionCallback, MotionEngine, Scheduling};
pub use filter::{AxisSmoother, OneEuroFilter};
pub use flow::{FlowEstimator, FlowParams, FlowSample};
pub use mixer::{InputMixer, MotionProfile, MotionVector, OrientationSample, Platform};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
