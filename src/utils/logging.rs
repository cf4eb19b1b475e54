//! Logging initialization
//!
//! Structured JSON logging to stdout and a daily-rolling log file.

use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system.
///
/// Logs are written in JSON format to stdout and to a daily file under
/// `LOG_DIR` (default `logs/`), named `eventwatch.log.YYYY-MM-DD`. The log
/// level is controlled by `RUST_LOG`; the default is `info,eventwatch=debug`.
///
/// The returned `WorkerGuard` must be kept alive in `main`, otherwise
/// buffered log lines are lost on process exit.
pub fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

    let file_appender = rolling::daily(&log_dir, "eventwatch.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true)
        .flatten_event(false);

    let file_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true)
        .flatten_event(false)
        .with_ansi(false)
        .with_writer(non_blocking);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,eventwatch=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .ok(); // A second initialization (tests) is safe to ignore

    guard
}
