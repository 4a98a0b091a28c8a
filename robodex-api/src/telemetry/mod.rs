//! Robodex Telemetry - Logging Infrastructure
//!
//! Structured logging through `tracing`, plus the HTTP trace layer applied
//! to the router.

pub mod tracer;

pub use tracer::{http_trace_layer, init_tracer, LogFormat, TelemetryConfig};
