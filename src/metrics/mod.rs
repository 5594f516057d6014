//! Prometheus metrics for engine observability.
//!
//! The collector is always available; the HTTP exporter requires the
//! `metrics` feature.
//!
//! # Metrics Exposed
//!
//! ## Lifecycle
//! - `motion_fusion_enabled` - Engine enabled (1=camera acquired)
//! - `motion_fusion_subscribers` - Registered subscriber count
//! - `motion_fusion_frames_processed_total` - Camera frames processed
//! - `motion_fusion_zero_flow_frames_total` - Frames with zero flow
//!
//! ## Signal
//! - `motion_fusion_flow_dx` / `motion_fusion_flow_dy` - Latest flow sample
//! - `motion_fusion_vector_x` / `motion_fusion_vector_y` - Published vector

mod collector;

#[cfg(feature = "metrics")]
mod server;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};

#[cfg(feature = "metrics")]
pub use server::{MetricsServer, MetricsServerConfig, MetricsState, ServerError, SnapshotFn};
