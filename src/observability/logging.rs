//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber (console + append-only file)
//! - Emit the one-line-per-request access record
//!
//! # Design Decisions
//! - `RUST_LOG` takes precedence over the configured level
//! - The file layer never rotates and never truncates; it appends
//! - The file writer is non-blocking; the returned guard flushes on drop

use std::time::Instant;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{ObservabilityConfig, Role};

/// Error type for logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file: {0}")]
    File(#[from] InitError),

    #[error("failed to install subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Install the global subscriber.
///
/// Returns the file writer guard when file logging is enabled; hold it for
/// the lifetime of the process.
pub fn init_logging(
    config: &ObservabilityConfig,
    role: Role,
) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let (file_layer, guard) = if config.file_logging {
        let file_name = config
            .log_file
            .clone()
            .unwrap_or_else(|| role.default_log_file().to_string());
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(file_name)
            .build(&config.log_dir)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_ansi(false).with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

/// Record one handled request.
pub fn record_request(service: &str, route: &str, status: u16, start: Instant) {
    let latency_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        service = %service,
        route = %route,
        status,
        latency_ms,
        "{} {} {} {}ms",
        service,
        route,
        status,
        latency_ms
    );
}
