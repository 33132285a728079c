use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking,
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber.
///
/// The console layer honours `RUST_LOG`. A JSON file layer rolling daily is
/// added when `enable_file` is set, and log records are bridged to
/// OpenTelemetry when a logger provider is supplied. The returned guard must
/// stay alive for buffered file output to be flushed.
pub fn init_logger(
    sdk_logger_provider: Option<&SdkLoggerProvider>,
    component: &str,
    is_dev: bool,
    enable_file: bool,
) -> Option<WorkerGuard> {
    let default_level = if is_dev { "info" } else { "warn" };

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .pretty()
        .with_thread_names(true)
        .with_ansi(is_dev)
        .with_filter(console_filter);

    let (file_layer, guard) = if enable_file {
        let log_dir = if is_dev { "./logs" } else { "/var/log/app" };
        let (writer, guard) = file_writer(log_dir, component);

        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let otel_layer = sdk_logger_provider.map(|provider| {
        OpenTelemetryTracingBridge::new(provider).with_filter(EnvFilter::new(
            "info,hyper=off,h2=off,tonic=off,opentelemetry=off,sqlx=warn",
        ))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(otel_layer)
        .init();

    guard
}

/// Daily-rolling `{component}.log.YYYY-MM-DD` files under `log_dir`, written
/// from a background worker.
fn file_writer(log_dir: &str, component: &str) -> (NonBlocking, WorkerGuard) {
    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, log_dir, format!("{component}.log"));
    non_blocking(file_appender)
}
