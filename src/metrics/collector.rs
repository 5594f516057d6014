//! Metrics collection and registry.

use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// A snapshot of engine state for metrics update.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    /// Whether the engine is enabled (camera acquired, motion allowed).
    pub enabled: bool,
    /// Number of registered subscribers.
    pub subscriber_count: usize,
    /// Total camera frames processed.
    pub frames_processed: u64,
    /// Frames that produced a zero flow sample (still or low-texture).
    pub zero_flow_frames: u64,
    /// Latest raw flow sample, X axis.
    pub flow_dx: f64,
    /// Latest raw flow sample, Y axis.
    pub flow_dy: f64,
    /// Latest published vector, X axis.
    pub vector_x: f64,
    /// Latest published vector, Y axis.
    pub vector_y: f64,
}

/// Prometheus metrics registry for engine monitoring.
pub struct MetricsRegistry {
    registry: Registry,

    // Lifecycle metrics
    enabled: IntGauge,
    subscriber_count: IntGauge,
    frames_processed: IntCounter,
    zero_flow_frames: IntCounter,

    // Signal metrics
    flow_dx: Gauge,
    flow_dy: Gauge,
    vector_x: Gauge,
    vector_y: Gauge,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all engine metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        // Lifecycle metrics
        let enabled = IntGauge::new(
            "motion_fusion_enabled",
            "Engine enabled (1=camera acquired, 0=degraded or idle)",
        )?;
        let subscriber_count = IntGauge::new(
            "motion_fusion_subscribers",
            "Number of registered motion subscribers",
        )?;
        let frames_processed = IntCounter::new(
            "motion_fusion_frames_processed_total",
            "Total camera frames processed",
        )?;
        let zero_flow_frames = IntCounter::new(
            "motion_fusion_zero_flow_frames_total",
            "Frames producing a zero flow sample (still or low texture)",
        )?;

        // Signal metrics
        let flow_dx = Gauge::new(
            "motion_fusion_flow_dx",
            "Latest optical flow sample, X axis (normalized grid units)",
        )?;
        let flow_dy = Gauge::new(
            "motion_fusion_flow_dy",
            "Latest optical flow sample, Y axis (normalized grid units)",
        )?;
        let vector_x = Gauge::new(
            "motion_fusion_vector_x",
            "Latest published motion vector, X axis",
        )?;
        let vector_y = Gauge::new(
            "motion_fusion_vector_y",
            "Latest published motion vector, Y axis",
        )?;

        // Register all metrics
        registry.register(Box::new(enabled.clone()))?;
        registry.register(Box::new(subscriber_count.clone()))?;
        registry.register(Box::new(frames_processed.clone()))?;
        registry.register(Box::new(zero_flow_frames.clone()))?;
        registry.register(Box::new(flow_dx.clone()))?;
        registry.register(Box::new(flow_dy.clone()))?;
        registry.register(Box::new(vector_x.clone()))?;
        registry.register(Box::new(vector_y.clone()))?;

        Ok(Self {
            registry,
            enabled,
            subscriber_count,
            frames_processed,
            zero_flow_frames,
            flow_dx,
            flow_dy,
            vector_x,
            vector_y,
        })
    }

    /// Updates all metrics from a snapshot of engine state.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        self.enabled.set(if snapshot.enabled { 1 } else { 0 });
        self.subscriber_count.set(snapshot.subscriber_count as i64);

        // For counters, increment by the difference since last update.
        let current_frames = self.frames_processed.get();
        if snapshot.frames_processed > current_frames {
            self.frames_processed
                .inc_by(snapshot.frames_processed - current_frames);
        }
        let current_zero = self.zero_flow_frames.get();
        if snapshot.zero_flow_frames > current_zero {
            self.zero_flow_frames
                .inc_by(snapshot.zero_flow_frames - current_zero);
        }

        self.flow_dx.set(snapshot.flow_dx);
        self.flow_dy.set(snapshot.flow_dy);
        self.vector_x.set(snapshot.vector_x);
        self.vector_y.set(snapshot.vector_y);
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
