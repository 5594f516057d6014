//! Frame source abstraction.
//!
//! This module provides a trait-based abstraction over camera hardware,
//! allowing for both real camera input and deterministic synthetic
//! sources for testing. The engine never touches a camera API directly;
//! everything goes through [`FrameSource`].

use super::{CaptureConfig, RawFrame};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during frame source operations.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("camera device not found: {0}")]
    DeviceNotFound(String),
    #[error("camera permission denied: {0}")]
    PermissionDenied(String),
    #[error("failed to open camera: {0}")]
    OpenFailed(String),
    #[error("failed to configure camera: {0}")]
    ConfigFailed(String),
    #[error("failed to capture frame: {0}")]
    CaptureFailed(String),
    #[error("frame source not initialized")]
    NotInitialized,
}

/// Trait for frame source implementations.
///
/// This abstraction allows swapping between real camera hardware
/// and synthetic implementations for testing. Acquisition is a
/// one-shot operation: the engine never retries a failed `open`.
pub trait FrameSource {
    /// Opens and initializes the source with the given configuration.
    fn open(&mut self, config: &CaptureConfig) -> Result<(), SourceError>;

    /// Captures a single frame.
    fn capture(&mut self) -> Result<RawFrame, SourceError>;

    /// Checks if the source is currently open.
    fn is_open(&self) -> bool;

    /// Closes the source and releases the underlying hardware.
    fn close(&mut self);
}

/// Observable counters for a [`SyntheticSource`].
///
/// Lifecycle tests hold onto the probe after the source has been moved
/// into the engine, to verify that the camera is acquired lazily and
/// released when the last subscriber leaves.
#[derive(Debug, Default)]
pub struct SourceProbe {
    opens: AtomicU32,
    closes: AtomicU32,
    captures: AtomicU64,
}

impl SourceProbe {
    /// Number of successful `open` calls observed.
    pub fn opens(&self) -> u32 {
        self.opens.load(Ordering::Acquire)
    }

    /// Number of `close` calls observed.
    pub fn closes(&self) -> u32 {
        self.closes.load(Ordering::Acquire)
    }

    /// Number of frames captured.
    pub fn captures(&self) -> u64 {
        self.captures.load(Ordering::Acquire)
    }

    /// True while the source is held open.
    pub fn is_open(&self) -> bool {
        self.opens() > self.closes()
    }
}

/// Deterministic synthetic frame source for tests and demos.
///
/// Generates a textured sinusoidal pattern that drifts a fixed number
/// of pixels per frame, so block matching sees genuine motion with a
/// known direction. A zero drift produces identical consecutive frames.
pub struct SyntheticSource {
    config: Option<CaptureConfig>,
    sequence: u64,
    /// Pattern drift in pixels per frame (dx, dy).
    drift: (f64, f64),
    /// When set, `open` fails with a permission error.
    deny_open: bool,
    probe: Arc<SourceProbe>,
}

impl SyntheticSource {
    /// Creates a static source (identical frames, zero flow).
    pub fn new() -> Self {
        Self::with_drift(0.0, 0.0)
    }

    /// Creates a source whose pattern drifts by the given pixels per frame.
    pub fn with_drift(dx: f64, dy: f64) -> Self {
        Self {
            config: None,
            sequence: 0,
            drift: (dx, dy),
            deny_open: false,
            probe: Arc::new(SourceProbe::default()),
        }
    }

    /// Creates a source that refuses to open, simulating a denied
    /// camera permission.
    pub fn denied() -> Self {
        Self {
            deny_open: true,
            ..Self::new()
        }
    }

    /// Returns a handle to the lifecycle probe.
    pub fn probe(&self) -> Arc<SourceProbe> {
        Arc::clone(&self.probe)
    }

    fn pattern_value(&self, x: u32, y: u32) -> u8 {
        let (dx, dy) = self.drift;
        let fx = x as f64 - dx * self.sequence as f64;
        let fy = y as f64 - dy * self.sequence as f64;
        // Two crossed sine waves give gradient texture everywhere.
        let v = (fx * 0.35).sin() * (fy * 0.35).sin();
        (127.5 * (1.0 + v)) as u8
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for SyntheticSource {
    fn open(&mut self, config: &CaptureConfig) -> Result<(), SourceError> {
        if self.deny_open {
            return Err(SourceError::PermissionDenied("synthetic denial".into()));
        }
        config
            .validate()
            .map_err(|e| SourceError::ConfigFailed(e.to_string()))?;
        self.config = Some(config.clone());
        self.sequence = 0;
        self.probe.opens.fetch_add(1, Ordering::AcqRel);
        tracing::info!(?config, "SyntheticSource opened");
        Ok(())
    }

    fn capture(&mut self) -> Result<RawFrame, SourceError> {
        let config = self.config.as_ref().ok_or(SourceError::NotInitialized)?;
        let (width, height) = (config.width, config.height);

        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = self.pattern_value(x, y);
                pixels.extend_from_slice(&[v, v, v]);
            }
        }

        self.sequence += 1;
        self.probe.captures.fetch_add(1, Ordering::AcqRel);
        Ok(RawFrame::new(pixels, width, height, self.sequence))
    }

    fn is_open(&self) -> bool {
        self.config.is_some()
    }

    fn close(&mut self) {
        if self.config.take().is_some() {
            self.probe.closes.fetch_add(1, Ordering::AcqRel);
            tracing::info!("SyntheticSource closed");
        }
    }
}
