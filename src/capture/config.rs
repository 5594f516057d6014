//! Capture and engine configuration.
//!
//! A fixed low capture resolution is deliberate: the flow estimator
//! only ever sees a tiny downsampled grid, so anything beyond QQVGA
//! is wasted bandwidth and decode time.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for camera capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Camera device index or identifier.
    pub device_id: u32,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Target frames per second; also the filter sample rate.
    pub fps: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device_id: 0,
            width: 160,
            height: 120,
            fps: 30,
        }
    }
}

impl CaptureConfig {
    /// Creates a new configuration with the specified dimensions.
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.fps == 0 || self.fps > 120 {
            return Err(ConfigError::InvalidFrameRate);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid frame dimensions")]
    InvalidDimensions,
    #[error("invalid frame rate (must be 1-120 fps)")]
    InvalidFrameRate,
    #[error("unknown platform class: {0}")]
    UnknownPlatform(String),
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Engine-level settings from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Platform class: "auto", "desktop" or "mobile".
    pub platform: String,
    /// Viewport width hint used when platform is "auto".
    pub viewport_width: u32,
    /// User-agent hint used when platform is "auto".
    pub user_agent: String,
    /// Reduced-motion preference; disables the engine entirely.
    pub reduced_motion: bool,
    /// Per-platform tuning overrides; `None` uses the built-in profile.
    #[serde(default)]
    pub profile: Option<crate::mixer::MotionProfile>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            platform: "auto".to_string(),
            viewport_width: 1280,
            user_agent: String::new(),
            reduced_motion: false,
            profile: None,
        }
    }
}

impl EngineSettings {
    /// Resolves the configured platform class, applying auto-detection
    /// from the viewport/user-agent hints when requested.
    pub fn resolve_platform(&self) -> Result<crate::mixer::Platform, ConfigError> {
        use crate::mixer::Platform;
        match self.platform.as_str() {
            "auto" => Ok(Platform::detect(self.viewport_width, &self.user_agent)),
            "desktop" => Ok(Platform::Desktop),
            "mobile" => Ok(Platform::Mobile),
            other => Err(ConfigError::UnknownPlatform(other.to_string())),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Run continuously (true) or process fixed number of frames (false).
    pub continuous: bool,
    /// Number of frames to process if not continuous.
    pub frame_count: u32,
    /// Metrics server port (0 to disable).
    pub metrics_port: u16,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            continuous: false,
            frame_count: 100,
            metrics_port: 9090,
        }
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.capture.validate()?;
        config.engine.resolve_platform()?;
        Ok(config)
    }
}
