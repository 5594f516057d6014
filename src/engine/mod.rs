//! Engine lifecycle, subscription and publishing.
//!
//! The engine owns the whole pipeline: frame source, flow estimator
//! and input mixer, plus the subscriber set that alone decides when
//! the camera is held open. Construction is cheap and side-effect
//! free; the camera is acquired lazily on the first subscription and
//! released synchronously when the last subscriber leaves.

mod hub;
mod ticker;

pub use hub::{MotionCallback, SubscriberSet};
pub use ticker::{FixedRateTicker, ManualTicker, MotionCell, Ticker};

use crate::capture::{CaptureConfig, ConfigError, FileConfig, FrameSource, SourceError};
use crate::flow::{FlowEstimator, FlowParams, FlowSample};
use crate::mixer::{InputMixer, MotionProfile, MotionVector, OrientationSample};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle, ThreadId};
use thiserror::Error;

/// Errors surfaced by engine construction and configuration.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("frame source error: {0}")]
    Source(#[from] SourceError),
}

/// How the per-frame loop is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduling {
    /// A dedicated worker thread paces itself at the capture rate.
    Worker,
    /// The host calls [`MotionEngine::tick_once`] from its own loop.
    Manual,
}

/// Runtime configuration for a [`MotionEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Camera capture settings; `fps` doubles as the filter rate.
    pub capture: CaptureConfig,
    /// Platform tuning profile.
    pub profile: MotionProfile,
    /// Reduced-motion preference: disables the engine entirely.
    pub reduced_motion: bool,
    /// Loop scheduling mode.
    pub scheduling: Scheduling,
}

impl EngineConfig {
    /// Desktop configuration with default capture settings.
    pub fn desktop() -> Self {
        Self {
            capture: CaptureConfig::default(),
            profile: MotionProfile::desktop(),
            reduced_motion: false,
            scheduling: Scheduling::Worker,
        }
    }

    /// Mobile configuration with default capture settings.
    pub fn mobile() -> Self {
        Self {
            profile: MotionProfile::mobile(),
            ..Self::desktop()
        }
    }

    /// Builds a runtime configuration from a parsed config file.
    pub fn from_file_config(file: &FileConfig) -> Result<Self, EngineError> {
        let platform = file.engine.resolve_platform()?;
        let profile = file
            .engine
            .profile
            .clone()
            .unwrap_or_else(|| platform.profile());
        Ok(Self {
            capture: file.capture.clone(),
            profile,
            reduced_motion: file.engine.reduced_motion,
            scheduling: Scheduling::Worker,
        })
    }
}

/// Pipeline state mutated only by the single processing step.
struct EngineCore {
    source: Box<dyn FrameSource + Send>,
    estimator: FlowEstimator,
    mixer: InputMixer,
    last_flow: FlowSample,
    frames_processed: u64,
    zero_flow_frames: u64,
}

impl EngineCore {
    /// Runs one processing step: capture, flow, smooth, mix.
    ///
    /// With the source closed (degraded mode) the flow sample is zero
    /// and the mixer keeps publishing from pointer/orientation input.
    fn tick(&mut self) -> MotionVector {
        let flow = if self.source.is_open() {
            match self.source.capture() {
                Ok(frame) if !frame.is_valid() => {
                    // A buffer that disagrees with its dimensions would
                    // index out of bounds further down the pipeline.
                    tracing::warn!(sequence = frame.sequence(), "dropping malformed frame");
                    FlowSample::ZERO
                }
                Ok(frame) => {
                    self.frames_processed += 1;
                    self.estimator.process(&frame)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "frame capture failed");
                    FlowSample::ZERO
                }
            }
        } else {
            FlowSample::ZERO
        };

        if flow == FlowSample::ZERO {
            self.zero_flow_frames += 1;
        }
        self.last_flow = flow;
        self.mixer.update(flow)
    }
}

/// Worker thread driving the loop under [`Scheduling::Worker`].
struct Worker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
    thread_id: ThreadId,
}

struct EngineInner {
    config: EngineConfig,
    core: Mutex<EngineCore>,
    subscribers: Mutex<SubscriberSet>,
    cell: MotionCell,
    /// True iff reduced-motion is off and acquisition succeeded.
    enabled: AtomicBool,
    /// Set once per subscription cycle; acquisition is never retried
    /// automatically after a failure.
    acquisition_attempted: AtomicBool,
    worker: Mutex<Option<Worker>>,
}

impl Drop for EngineInner {
    /// Runs once every engine handle is gone: the worker holds only a
    /// weak reference, so it is told to stop rather than joined (this
    /// drop may execute on the worker thread itself), and the camera
    /// is released even if the last subscriber never left.
    fn drop(&mut self) {
        if let Some(worker) = self
            .worker
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
        {
            worker.stop.store(true, Ordering::Release);
        }
        self.core
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .source
            .close();
    }
}

/// Lock helper that survives poisoning: a panicked subscriber
/// callback must not wedge the whole engine.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Real-time motion-input fusion engine.
///
/// Cheap to clone; all clones share the same engine instance.
#[derive(Clone)]
pub struct MotionEngine {
    inner: Arc<EngineInner>,
}

impl MotionEngine {
    /// Creates an engine over the given frame source.
    ///
    /// No hardware is touched here. When `config.reduced_motion` is
    /// set the engine is permanently inert: subscriptions become
    /// no-ops and the source is never opened.
    pub fn new(config: EngineConfig, source: Box<dyn FrameSource + Send>) -> Self {
        if config.reduced_motion {
            tracing::info!("reduced motion requested, engine disabled");
        }

        let rate = config.capture.fps.max(1) as f64;
        let params = FlowParams::default();
        let core = EngineCore {
            source,
            estimator: FlowEstimator::with_params(config.profile.size, params),
            mixer: InputMixer::new(config.profile.clone(), rate),
            last_flow: FlowSample::ZERO,
            frames_processed: 0,
            zero_flow_frames: 0,
        };

        Self {
            inner: Arc::new(EngineInner {
                config,
                core: Mutex::new(core),
                subscribers: Mutex::new(SubscriberSet::new()),
                cell: MotionCell::new(),
                enabled: AtomicBool::new(false),
                acquisition_attempted: AtomicBool::new(false),
                worker: Mutex::new(None),
            }),
        }
    }

    /// Registers a consumer callback.
    ///
    /// The first subscriber triggers camera acquisition and starts
    /// the processing loop. Acquisition failure leaves the engine in
    /// degraded mode: the loop still runs so pointer/orientation
    /// fallback keeps publishing, but `enabled` stays false.
    pub fn subscribe(&self, callback: MotionCallback) {
        if self.inner.config.reduced_motion {
            return;
        }

        let first = {
            let mut subs = lock(&self.inner.subscribers);
            subs.insert(callback) && subs.len() == 1
        };
        if !first {
            return;
        }

        self.try_acquire();
        if self.inner.config.scheduling == Scheduling::Worker {
            self.start_worker();
        }
    }

    /// Deregisters a consumer callback.
    ///
    /// When the set becomes empty the loop is stopped synchronously
    /// and the camera is released before this method returns.
    pub fn unsubscribe(&self, callback: &MotionCallback) {
        if self.inner.config.reduced_motion {
            return;
        }

        let emptied = {
            let mut subs = lock(&self.inner.subscribers);
            subs.remove(callback) && subs.is_empty()
        };
        if !emptied {
            return;
        }

        self.stop_worker();
        lock(&self.inner.core).source.close();
        self.inner.enabled.store(false, Ordering::Release);
        // A future first subscriber starts a fresh acquisition cycle.
        self.inner.acquisition_attempted.store(false, Ordering::Release);
        tracing::info!("last subscriber left, camera released");
    }

    /// Explicit one-shot acquisition attempt.
    ///
    /// With subscribers present this is idempotent with the implicit
    /// attempt from `subscribe`. Without subscribers it is a pure
    /// permission probe: a granted camera is released again right
    /// away, and the first subscriber reacquires it. Returns whether
    /// the camera was granted.
    pub fn request_permission(&self) -> bool {
        if self.inner.config.reduced_motion {
            return false;
        }
        self.try_acquire();
        let granted = self.inner.enabled.load(Ordering::Acquire);

        // The camera is only held while the subscriber set is
        // non-empty; a bare probe must not keep the stream open.
        if granted && lock(&self.inner.subscribers).is_empty() {
            lock(&self.inner.core).source.close();
            self.inner.enabled.store(false, Ordering::Release);
            self.inner.acquisition_attempted.store(false, Ordering::Release);
        }
        granted
    }

    /// True iff reduced-motion is off and camera acquisition succeeded.
    pub fn enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::Acquire)
    }

    /// Last published vector; usable without subscribing.
    pub fn position(&self) -> MotionVector {
        self.inner.cell.load()
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner.subscribers).len()
    }

    /// Feeds the latest pointer position, normalized to [-1, 1].
    pub fn set_pointer(&self, x: f64, y: f64) {
        if self.inner.config.reduced_motion {
            return;
        }
        lock(&self.inner.core).mixer.set_pointer(x, y);
    }

    /// Feeds a device-orientation event.
    pub fn push_orientation(&self, sample: OrientationSample) {
        if self.inner.config.reduced_motion {
            return;
        }
        lock(&self.inner.core).mixer.set_orientation(sample);
    }

    /// Runs one processing step under [`Scheduling::Manual`].
    ///
    /// Does nothing without subscribers; returns the newest vector
    /// either way.
    pub fn tick_once(&self) -> MotionVector {
        if self.inner.config.reduced_motion || lock(&self.inner.subscribers).is_empty() {
            return self.position();
        }
        Self::publish_tick(&self.inner);
        self.position()
    }

    /// Snapshot of engine state for the metrics collector.
    pub fn metrics_snapshot(&self) -> crate::metrics::MetricsSnapshot {
        let core = lock(&self.inner.core);
        let vector = self.inner.cell.load();
        crate::metrics::MetricsSnapshot {
            enabled: self.enabled(),
            subscriber_count: lock(&self.inner.subscribers).len(),
            frames_processed: core.frames_processed,
            zero_flow_frames: core.zero_flow_frames,
            flow_dx: core.last_flow.dx,
            flow_dy: core.last_flow.dy,
            vector_x: vector.x,
            vector_y: vector.y,
        }
    }

    /// Attempts acquisition once per subscription cycle.
    fn try_acquire(&self) {
        if self.inner.acquisition_attempted.swap(true, Ordering::AcqRel) {
            return;
        }
        let mut core = lock(&self.inner.core);
        match core.source.open(&self.inner.config.capture) {
            Ok(()) => {
                self.inner.enabled.store(true, Ordering::Release);
                tracing::info!("camera acquired");
            }
            Err(e) => {
                // Degraded mode: no retry, pointer/orientation only.
                tracing::warn!(error = %e, "camera acquisition failed, degraded mode");
            }
        }
    }

    /// One full processing step: tick, publish, fan out.
    fn publish_tick(inner: &Arc<EngineInner>) {
        let vector = lock(&inner.core).tick();
        inner.cell.store(vector);

        // Fan out outside the lock; every subscriber sees the same pair.
        let callbacks = lock(&inner.subscribers).snapshot();
        for callback in callbacks {
            callback(vector.x, vector.y);
        }
    }

    fn start_worker(&self) {
        let mut slot = lock(&self.inner.worker);
        if slot.is_some() {
            return;
        }

        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        // A weak handle only: the worker must not keep the engine (and
        // with it the camera) alive after every user handle is gone.
        let weak = Arc::downgrade(&self.inner);
        let rate = self.inner.config.capture.fps.max(1) as f64;

        let spawned = thread::Builder::new()
            .name("motion-fusion".into())
            .spawn(move || {
                let mut ticker = FixedRateTicker::new(rate);
                while !stop_flag.load(Ordering::Acquire) {
                    let Some(inner) = weak.upgrade() else {
                        break;
                    };
                    Self::publish_tick(&inner);
                    drop(inner);
                    ticker.wait();
                }
            });

        match spawned {
            Ok(handle) => {
                let thread_id = handle.thread().id();
                *slot = Some(Worker {
                    stop,
                    handle,
                    thread_id,
                });
            }
            Err(e) => tracing::warn!(error = %e, "failed to spawn worker thread"),
        }
    }

    /// Stops the worker and waits for the in-flight tick to finish,
    /// so no frame is processed after teardown returns.
    fn stop_worker(&self) {
        let worker = lock(&self.inner.worker).take();
        if let Some(worker) = worker {
            worker.stop.store(true, Ordering::Release);
            // Unsubscribe from inside a subscriber callback runs on
            // the worker itself; it cannot join its own thread.
            if thread::current().id() != worker.thread_id {
                let _ = worker.handle.join();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{RawFrame, SyntheticSource};
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn manual_config() -> EngineConfig {
        EngineConfig {
            scheduling: Scheduling::Manual,
            ..EngineConfig::desktop()
        }
    }

    fn noop() -> MotionCallback {
        Arc::new(|_, _| {})
    }

    #[test]
    fn test_construction_touches_no_hardware() {
        let source = SyntheticSource::new();
        let probe = source.probe();
        let _engine = MotionEngine::new(manual_config(), Box::new(source));

        assert_eq!(probe.opens(), 0);
    }

    #[test]
    fn test_lazy_acquire_and_release() {
        let source = SyntheticSource::new();
        let probe = source.probe();
        let engine = MotionEngine::new(manual_config(), Box::new(source));

        let cb = noop();
        engine.subscribe(Arc::clone(&cb));
        assert!(probe.is_open());
        assert!(engine.enabled());

        engine.unsubscribe(&cb);
        assert!(!probe.is_open());
        assert!(!engine.enabled());
    }

    #[test]
    fn test_double_subscribe_acquires_once() {
        let source = SyntheticSource::new();
        let probe = source.probe();
        let engine = MotionEngine::new(manual_config(), Box::new(source));

        let cb = noop();
        engine.subscribe(Arc::clone(&cb));
        engine.subscribe(Arc::clone(&cb));

        assert_eq!(probe.opens(), 1);
        assert_eq!(engine.subscriber_count(), 1);

        // One unsubscribe releases: it was a set entry, not a count.
        engine.unsubscribe(&cb);
        assert!(!probe.is_open());
    }

    #[test]
    fn test_camera_held_until_last_unsubscribe() {
        let source = SyntheticSource::new();
        let probe = source.probe();
        let engine = MotionEngine::new(manual_config(), Box::new(source));

        let a = noop();
        let b = noop();
        engine.subscribe(Arc::clone(&a));
        engine.subscribe(Arc::clone(&b));

        engine.unsubscribe(&a);
        assert!(probe.is_open());

        engine.unsubscribe(&b);
        assert!(!probe.is_open());
    }

    #[test]
    fn test_reduced_motion_is_inert() {
        let source = SyntheticSource::new();
        let probe = source.probe();
        let config = EngineConfig {
            reduced_motion: true,
            ..manual_config()
        };
        let engine = MotionEngine::new(config, Box::new(source));

        let cb = noop();
        engine.subscribe(Arc::clone(&cb));

        assert_eq!(probe.opens(), 0);
        assert!(!engine.enabled());
        assert!(!engine.request_permission());
        assert_eq!(engine.tick_once(), MotionVector::ZERO);
        assert_eq!(engine.subscriber_count(), 0);
    }

    #[test]
    fn test_degraded_mode_pointer_only() {
        let engine = MotionEngine::new(manual_config(), Box::new(SyntheticSource::denied()));

        let cb = noop();
        engine.subscribe(Arc::clone(&cb));
        assert!(!engine.enabled());

        engine.set_pointer(0.5, -0.4);
        let v = engine.tick_once();

        // Desktop blend with camera axes pinned at zero:
        // x = 0.5 * 0.7, y = pointer-only.
        assert!((v.x - 0.35).abs() < 1e-9, "x = {}", v.x);
        assert!((v.y - -0.4).abs() < 1e-9, "y = {}", v.y);
    }

    #[test]
    fn test_permission_probe_releases_camera() {
        let source = SyntheticSource::new();
        let probe = source.probe();
        let engine = MotionEngine::new(manual_config(), Box::new(source));

        // A bare probe reports the grant but must not hold the stream:
        // only subscribers keep the camera open.
        assert!(engine.request_permission());
        assert_eq!(engine.subscriber_count(), 0);
        assert!(!probe.is_open());
        assert!(!engine.enabled());

        // The first subscriber performs a fresh acquisition.
        let cb = noop();
        engine.subscribe(Arc::clone(&cb));
        assert!(probe.is_open());
        assert!(engine.enabled());
        assert_eq!(probe.opens(), 2);

        engine.unsubscribe(&cb);
        assert!(!probe.is_open());
    }

    #[test]
    fn test_failed_acquisition_not_retried() {
        let source = SyntheticSource::denied();
        let engine = MotionEngine::new(manual_config(), Box::new(source));

        let cb = noop();
        engine.subscribe(Arc::clone(&cb));
        assert!(!engine.enabled());

        // Explicit request after the implicit attempt is idempotent.
        assert!(!engine.request_permission());
        for _ in 0..5 {
            engine.tick_once();
        }
        assert!(!engine.enabled());
    }

    #[test]
    fn test_fanout_identical_pairs() {
        let engine = MotionEngine::new(
            manual_config(),
            Box::new(SyntheticSource::with_drift(3.0, 0.0)),
        );

        let seen_a = Arc::new(Mutex::new(Vec::new()));
        let seen_b = Arc::new(Mutex::new(Vec::new()));
        let (ca, cb) = (Arc::clone(&seen_a), Arc::clone(&seen_b));

        let sub_a: MotionCallback =
            Arc::new(move |x, y| lock(&ca).push((x, y)));
        let sub_b: MotionCallback =
            Arc::new(move |x, y| lock(&cb).push((x, y)));

        engine.subscribe(Arc::clone(&sub_a));
        engine.subscribe(Arc::clone(&sub_b));

        for _ in 0..8 {
            engine.tick_once();
        }

        let a = lock(&seen_a).clone();
        let b = lock(&seen_b).clone();
        assert_eq!(a.len(), 8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_position_polls_without_subscription() {
        let engine = MotionEngine::new(manual_config(), Box::new(SyntheticSource::denied()));

        let cb = noop();
        engine.subscribe(Arc::clone(&cb));
        engine.set_pointer(1.0, 1.0);
        engine.tick_once();
        engine.unsubscribe(&cb);

        // Another handle can poll the last published vector.
        let poller = engine.clone();
        let v = poller.position();
        assert!((v.x - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_no_processing_after_last_unsubscribe() {
        let source = SyntheticSource::new();
        let probe = source.probe();
        let engine = MotionEngine::new(manual_config(), Box::new(source));

        let cb = noop();
        engine.subscribe(Arc::clone(&cb));
        engine.tick_once();
        engine.tick_once();

        let captured = probe.captures();
        engine.unsubscribe(&cb);

        engine.tick_once();
        engine.tick_once();
        assert_eq!(probe.captures(), captured);
    }

    #[test]
    fn test_resubscription_reacquires() {
        let source = SyntheticSource::new();
        let probe = source.probe();
        let engine = MotionEngine::new(manual_config(), Box::new(source));

        let cb = noop();
        engine.subscribe(Arc::clone(&cb));
        engine.unsubscribe(&cb);
        engine.subscribe(Arc::clone(&cb));

        assert_eq!(probe.opens(), 2);
        assert!(engine.enabled());
    }

    #[test]
    fn test_worker_loop_runs_and_stops() {
        let source = SyntheticSource::with_drift(2.0, 0.0);
        let probe = source.probe();
        let config = EngineConfig {
            capture: CaptureConfig {
                fps: 100,
                ..CaptureConfig::default()
            },
            ..EngineConfig::desktop()
        };
        let engine = MotionEngine::new(config, Box::new(source));

        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let cb: MotionCallback = Arc::new(move |_, _| {
            counter.fetch_add(1, Ordering::AcqRel);
        });

        engine.subscribe(Arc::clone(&cb));
        std::thread::sleep(Duration::from_millis(100));
        engine.unsubscribe(&cb);

        assert!(!probe.is_open());
        let seen = ticks.load(Ordering::Acquire);
        assert!(seen > 0, "worker never ticked");

        // Teardown is synchronous: nothing runs afterwards.
        let captured = probe.captures();
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(ticks.load(Ordering::Acquire), seen);
        assert_eq!(probe.captures(), captured);
    }

    /// Source whose frames advertise dimensions their buffer cannot
    /// back, as a misbehaving third-party backend might.
    struct TruncatedSource {
        open: bool,
    }

    impl FrameSource for TruncatedSource {
        fn open(&mut self, _config: &CaptureConfig) -> Result<(), SourceError> {
            self.open = true;
            Ok(())
        }

        fn capture(&mut self) -> Result<RawFrame, SourceError> {
            Ok(RawFrame::new(vec![0u8; 16], 64, 48, 1))
        }

        fn is_open(&self) -> bool {
            self.open
        }

        fn close(&mut self) {
            self.open = false;
        }
    }

    #[test]
    fn test_malformed_frame_is_dropped() {
        let engine = MotionEngine::new(manual_config(), Box::new(TruncatedSource { open: false }));

        let cb = noop();
        engine.subscribe(Arc::clone(&cb));
        assert!(engine.enabled());

        // Each tick must survive the bad frame and publish a centered
        // vector instead of indexing past the truncated buffer.
        for _ in 0..3 {
            assert_eq!(engine.tick_once(), MotionVector::ZERO);
        }

        let snapshot = engine.metrics_snapshot();
        assert_eq!(snapshot.frames_processed, 0);
        assert_eq!(snapshot.zero_flow_frames, 3);

        engine.unsubscribe(&cb);
    }

    #[test]
    fn test_drop_releases_camera() {
        let source = SyntheticSource::new();
        let probe = source.probe();
        let engine = MotionEngine::new(manual_config(), Box::new(source));

        let cb = noop();
        engine.subscribe(Arc::clone(&cb));
        assert!(probe.is_open());

        // Dropping every handle without unsubscribing still releases
        // the camera.
        drop(engine);
        assert!(!probe.is_open());
    }

    #[test]
    fn test_dropped_engine_stops_worker() {
        let source = SyntheticSource::new();
        let probe = source.probe();
        let config = EngineConfig {
            capture: CaptureConfig {
                fps: 100,
                ..CaptureConfig::default()
            },
            ..EngineConfig::desktop()
        };
        let engine = MotionEngine::new(config, Box::new(source));

        let cb = noop();
        engine.subscribe(Arc::clone(&cb));
        assert!(probe.is_open());

        drop(engine);

        // The worker holds only a weak reference: it notices the
        // engine is gone within a tick, releases the camera and exits.
        std::thread::sleep(Duration::from_millis(100));
        assert!(!probe.is_open());

        let captured = probe.captures();
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(probe.captures(), captured);
    }

    #[test]
    fn test_metrics_snapshot_reflects_state() {
        let engine = MotionEngine::new(
            manual_config(),
            Box::new(SyntheticSource::with_drift(2.0, 0.0)),
        );

        let cb = noop();
        engine.subscribe(Arc::clone(&cb));
        for _ in 0..4 {
            engine.tick_once();
        }

        let snapshot = engine.metrics_snapshot();
        assert!(snapshot.enabled);
        assert_eq!(snapshot.subscriber_count, 1);
        assert_eq!(snapshot.frames_processed, 4);
    }
}
