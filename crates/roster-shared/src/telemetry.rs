//! Telemetry setup

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;
use crate::error::AppError;

pub fn init_telemetry(settings: &LoggingSettings) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = match &settings.directory {
        Some(dir) => Some(
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("roster")
                .filename_suffix("log")
                .build(dir)
                .map_err(|e| AppError::TelemetryError(e.to_string()))?,
        ),
        None => None,
    };

    let result = match settings.format.as_str() {
        "json" => {
            let file_layer = file_appender.map(|writer| {
                fmt::layer().json().with_writer(writer).with_target(true)
            });
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_target(true))
                .with(file_layer)
                .try_init()
        }
        _ => {
            let file_layer = file_appender.map(|writer| {
                fmt::layer().with_writer(writer).with_target(true).with_ansi(false)
            });
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_target(true))
                .with(file_layer)
                .try_init()
        }
    };

    result.map_err(|e| AppError::TelemetryError(e.to_string()))
}
