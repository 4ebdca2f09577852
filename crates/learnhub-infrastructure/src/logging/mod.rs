//! Logging bootstrap.
//!
//! Every record goes to a daily rolling file as one-line JSON. Debug builds
//! additionally print compact lines to stderr so they do not mix with the
//! interactive session on stdout.
//!
//! `log` macros used throughout the workspace are bridged into `tracing`.

use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

/// Base name of the rolling log file
pub const LOG_FILE_NAME: &str = "learnhub.log";

const STDERR_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize the global subscriber. Calling it again is a no-op.
///
/// `level` is an `EnvFilter` directive such as `"info"`; `RUST_LOG` wins
/// when set.
pub fn init_logger(log_dir: &Path, level: &str) -> anyhow::Result<()> {
    if LOG_DIR.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(log_dir)?;

    // already set when another subscriber bridged `log` first
    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_NAME));
    let _ = FILE_GUARD.set(guard);

    let file_layer = fmt::layer()
        .json()
        .with_writer(file_writer)
        .with_timer(ChronoLocal::rfc_3339())
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_current_span(false)
        .with_filter(build_filter(level));

    let stderr_layer = cfg!(debug_assertions).then(|| {
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_timer(ChronoLocal::new(STDERR_TIME_FORMAT.to_string()))
            .with_filter(build_filter(level))
    });

    let subscriber = Registry::default().with(file_layer).with(stderr_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to install the tracing subscriber: {}", e))?;

    let _ = LOG_DIR.set(log_dir.to_path_buf());

    tracing::info!(
        target: "learnhub::logging",
        log_dir = %log_dir.display(),
        filter = level,
        version = env!("CARGO_PKG_VERSION"),
        "logger ready"
    );

    Ok(())
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Directory the logger writes to, once initialized
pub fn get_log_dir() -> Option<PathBuf> {
    LOG_DIR.get().cloned()
}
