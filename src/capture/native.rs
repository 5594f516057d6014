//! Native camera source backed by `nokhwa`.
//!
//! Only compiled with the `camera` feature. The engine itself is
//! agnostic: it sees this type purely through [`FrameSource`].

use super::{CaptureConfig, FrameSource, RawFrame, SourceError};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

/// Camera-backed frame source.
pub struct NokhwaSource {
    camera: Option<Camera>,
    sequence: u64,
}

impl NokhwaSource {
    /// Creates an unopened native source.
    pub fn new() -> Self {
        Self {
            camera: None,
            sequence: 0,
        }
    }
}

impl Default for NokhwaSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for NokhwaSource {
    fn open(&mut self, config: &CaptureConfig) -> Result<(), SourceError> {
        config
            .validate()
            .map_err(|e| SourceError::ConfigFailed(e.to_string()))?;

        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(config.device_id), requested)
            .map_err(|e| SourceError::OpenFailed(e.to_string()))?;

        camera
            .open_stream()
            .map_err(|e| SourceError::OpenFailed(e.to_string()))?;

        tracing::info!(device = config.device_id, "native camera stream opened");
        self.camera = Some(camera);
        self.sequence = 0;
        Ok(())
    }

    fn capture(&mut self) -> Result<RawFrame, SourceError> {
        let camera = self.camera.as_mut().ok_or(SourceError::NotInitialized)?;

        let buffer = camera
            .frame()
            .map_err(|e| SourceError::CaptureFailed(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| SourceError::CaptureFailed(e.to_string()))?;

        let (width, height) = (decoded.width(), decoded.height());
        self.sequence += 1;
        Ok(RawFrame::new(decoded.into_raw(), width, height, self.sequence))
    }

    fn is_open(&self) -> bool {
        self.camera.is_some()
    }

    fn close(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            if let Err(e) = camera.stop_stream() {
                tracing::warn!(error = %e, "failed to stop camera stream");
            }
            tracing::info!("native camera stream released");
        }
    }
}
