//! Motion Fusion CLI
//!
//! Command-line demonstration of the motion-input fusion engine,
//! driving the pipeline from a synthetic frame source.

use clap::Parser;
use motion_fusion::{
    capture::SyntheticSource,
    engine::{EngineConfig, MotionCallback, MotionEngine, Scheduling},
    FileConfig,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "motion-fusion", version, about = "Motion-input fusion engine demo")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the platform class (auto, desktop, mobile).
    #[arg(short, long)]
    platform: Option<String>,

    /// Number of frames to process (overrides config).
    #[arg(short = 'n', long)]
    frames: Option<u32>,

    /// Run until Ctrl-C.
    #[arg(long)]
    continuous: bool,

    /// Synthetic pattern drift in pixels per frame along X.
    #[arg(long, default_value_t = 1.5)]
    drift: f64,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Motion Fusion v{}", motion_fusion::VERSION);
    info!("This is a demonstration using a synthetic frame source");

    let args = Args::parse();

    let mut file_config = match &args.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };
    if let Some(platform) = &args.platform {
        file_config.engine.platform = platform.clone();
    }

    let engine_config = match EngineConfig::from_file_config(&file_config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let continuous = args.continuous || file_config.output.continuous;
    let frame_count = args.frames.unwrap_or(file_config.output.frame_count);
    let metrics_port = file_config.output.metrics_port;
    let fps = engine_config.capture.fps.max(1);

    let source = SyntheticSource::with_drift(args.drift, 0.0);
    let probe = source.probe();

    // Continuous mode runs the worker thread; fixed mode ticks
    // manually at the capture rate so output is deterministic.
    let config = EngineConfig {
        scheduling: if continuous {
            Scheduling::Worker
        } else {
            Scheduling::Manual
        },
        ..engine_config
    };
    let engine = MotionEngine::new(config, Box::new(source));

    #[cfg(feature = "metrics")]
    spawn_metrics_exporter(&engine, metrics_port);
    #[cfg(not(feature = "metrics"))]
    let _ = metrics_port;

    let printer: MotionCallback = Arc::new(|x, y| {
        println!("motion: x={:+.4} y={:+.4}", x, y);
    });
    engine.subscribe(Arc::clone(&printer));

    if !engine.enabled() {
        info!("camera unavailable, running in degraded mode");
    }

    if continuous {
        info!("Running continuously, Ctrl-C to stop");

        let running = Arc::new(AtomicBool::new(true));
        let running_flag = Arc::clone(&running);
        if let Err(e) = ctrlc::set_handler(move || {
            running_flag.store(false, Ordering::Release);
        }) {
            eprintln!("Failed to install Ctrl-C handler: {}", e);
            std::process::exit(1);
        }

        while running.load(Ordering::Acquire) {
            std::thread::sleep(Duration::from_millis(100));
        }
    } else {
        info!(frames = frame_count, fps, "Processing frames");
        let period = Duration::from_secs_f64(1.0 / fps as f64);
        for _ in 0..frame_count {
            engine.tick_once();
            std::thread::sleep(period);
        }
    }

    engine.unsubscribe(&printer);

    let last = engine.position();
    info!(
        frames = probe.captures(),
        x = last.x,
        y = last.y,
        "Done; camera released: {}",
        !probe.is_open()
    );
}

/// Serves the Prometheus exporter from a background thread, pulling a
/// fresh engine snapshot on every scrape. A port of 0 disables it.
#[cfg(feature = "metrics")]
fn spawn_metrics_exporter(engine: &MotionEngine, port: u16) {
    use motion_fusion::metrics::{MetricsRegistry, MetricsServer, MetricsServerConfig};

    if port == 0 {
        return;
    }

    let registry = match MetricsRegistry::new() {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "metrics registry unavailable");
            return;
        }
    };
    let snapshot_engine = engine.clone();
    let server = MetricsServer::new(
        MetricsServerConfig::with_port(port),
        registry,
        Arc::new(move || snapshot_engine.metrics_snapshot()),
    );

    let spawned = std::thread::Builder::new()
        .name("metrics-exporter".into())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to start metrics runtime");
                    return;
                }
            };
            if let Err(e) = runtime.block_on(server.run()) {
                tracing::warn!(error = %e, "metrics exporter stopped");
            }
        });
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "failed to spawn metrics exporter thread");
    }
}
