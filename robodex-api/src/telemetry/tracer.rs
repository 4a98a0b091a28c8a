//! Tracing Subscriber Initialization
//!
//! Sets up the global `tracing` subscriber with an `EnvFilter` and either
//! human-readable or JSON output.

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{ApiError, ApiResult};

const DEFAULT_FILTER: &str = "robodex_api=debug,robodex_storage=debug,tower_http=debug,info";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Telemetry configuration from environment variables.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Filter directives used when `RUST_LOG` is unset.
    pub default_filter: String,
    /// Log line format (`ROBODEX_LOG_FORMAT`).
    pub format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_filter: DEFAULT_FILTER.to_string(),
            format: std::env::var("ROBODEX_LOG_FORMAT")
                .map(|raw| LogFormat::parse(&raw))
                .unwrap_or(LogFormat::Pretty),
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once at startup, before any tracing occurs.
pub fn init_tracer(config: &TelemetryConfig) -> ApiResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };
    result.map_err(|e| ApiError::internal_error(format!("Failed to init subscriber: {}", e)))?;

    tracing::info!(format = ?config.format, "Telemetry initialized");
    Ok(())
}

/// Request/response tracing layer for the router.
pub fn http_trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Pretty);
    }

    #[test]
    fn test_default_filter_covers_service_crates() {
        let config = TelemetryConfig {
            default_filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Pretty,
        };
        assert!(config.default_filter.contains("robodex_api=debug"));
        assert!(config.default_filter.contains("tower_http"));
        assert!(EnvFilter::try_new(&config.default_filter).is_ok());
    }
}
