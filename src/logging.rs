use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, fmt, EnvFilter, Layer};

/// Logging configuration
pub struct LogConfig {
    pub log_dir: String,
    pub general_log_retention_days: usize,
    pub error_log_retention_days: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            general_log_retention_days: 10,
            error_log_retention_days: 30,
        }
    }
}

/// Initialize the logging system: a daily-rolling `info` file for
/// non-error levels, a daily-rolling `error` file, and a console layer
/// driven by `RUST_LOG`.
///
/// The returned guards must be kept alive for the lifetime of the
/// process so the non-blocking writers flush on shutdown.
pub fn init_logging(config: LogConfig) -> Vec<WorkerGuard> {
    fs::create_dir_all(&config.log_dir).expect("Failed to create log directory");

    let mut guards = Vec::new();

    let general_file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("info")
        .filename_suffix("log")
        .max_log_files(config.general_log_retention_days)
        .build(&config.log_dir)
        .expect("Failed to create general log appender");

    let (general_non_blocking, general_guard) =
        tracing_appender::non_blocking(general_file_appender);
    guards.push(general_guard);

    let error_file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("error")
        .filename_suffix("log")
        .max_log_files(config.error_log_retention_days)
        .build(&config.log_dir)
        .expect("Failed to create error log appender");

    let (error_non_blocking, error_guard) = tracing_appender::non_blocking(error_file_appender);
    guards.push(error_guard);

    let (console_non_blocking, console_guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(console_guard);

    // ANSI colors are disabled in the file layers
    let general_layer = fmt::layer()
        .with_writer(general_non_blocking)
        .with_ansi(false)
        .with_filter(filter::filter_fn(|meta| {
            !matches!(meta.level().as_str(), "ERROR")
        }));

    let error_layer = fmt::layer()
        .with_writer(error_non_blocking)
        .with_ansi(false)
        .with_filter(filter::filter_fn(|meta| meta.level().as_str() == "ERROR"));

    let console_layer = fmt::layer()
        .with_writer(console_non_blocking)
        .with_filter(EnvFilter::from_default_env());

    tracing_subscriber::registry()
        .with(general_layer)
        .with(error_layer)
        .with(console_layer)
        .init();

    guards
}
