//! Camera input and frame handling.
//!
//! This module provides abstractions for acquiring frames from a camera
//! and managing capture configuration. The camera is a lazily-acquired,
//! reference-counted resource: it is opened for the first subscriber
//! and released with the last.

mod config;
mod frame;
mod source;

#[cfg(feature = "camera")]
mod native;

pub use config::{CaptureConfig, ConfigError, EngineSettings, FileConfig, OutputConfig};
pub use frame::RawFrame;
pub use source::{FrameSource, SourceError, SourceProbe, SyntheticSource};

#[cfg(feature = "camera")]
pub use native::NokhwaSource;
