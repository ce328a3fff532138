//! # Gateway Telemetry
//!
//! Observability for the LLM routing gateway:
//! - Structured logging via `tracing` + `tracing-subscriber`.
//! - The metrics service: global/per-provider aggregates enriched with
//!   live circuit-breaker status, plus a Prometheus exposition format.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LoggingConfig};
pub use metrics::MetricsService;
