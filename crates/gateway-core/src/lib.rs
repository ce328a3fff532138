//! # Gateway Core
//!
//! Core types, traits, and error handling for the LLM routing gateway.
//!
//! This crate provides the foundational types shared by every other crate
//! in the workspace:
//! - The request/response shapes clients speak (`ChatRequest`, `ChatResponse`).
//! - The provider catalog and its live dynamic state snapshot.
//! - Metrics and status DTOs for the admin/analytics surface.
//! - The gateway-wide error type.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod estimator;
pub mod metrics;
pub mod provider;
pub mod request;
pub mod response;

pub use error::{GatewayError, GatewayResult};
pub use estimator::{estimate_cost, estimate_tokens};
pub use metrics::{AnalyticsResponse, GlobalMetrics, ProviderMetrics};
pub use provider::{
    CircuitStatus, ProviderDynamicState, ProviderSpec, ProviderStatus, Specialty,
};
pub use request::{ChatRequest, Priority, UserPreference};
pub use response::ChatResponse;
