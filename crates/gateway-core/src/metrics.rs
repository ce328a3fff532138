//! Metrics DTOs for the analytics surface.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::provider::CircuitStatus;

/// Process-wide aggregate counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GlobalMetrics {
    /// Total requests across all providers.
    pub total_requests: u64,
    /// Total successful requests.
    pub total_success: u64,
    /// Total failed requests (includes rate-limited attempts).
    pub total_failures: u64,
    /// Average latency in milliseconds over successful requests
    /// (`0.0` if there have been none).
    pub avg_latency_ms: f64,
    /// Total dollar cost incurred across all successful requests.
    pub total_cost: f64,
    /// `total_success / total_requests`, or `1.0` if there have been no
    /// requests yet.
    pub success_rate: f64,
}

/// Per-provider metrics, enriched at read time with live health status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProviderMetrics {
    /// Requests handled by this provider.
    pub requests: u64,
    /// Successful requests.
    pub success: u64,
    /// Failed requests.
    pub failures: u64,
    /// `success / requests`, or `1.0` if `requests == 0`.
    pub success_rate: f64,
    /// Average latency in milliseconds over successful requests.
    pub avg_latency_ms: f64,
    /// Administratively marked down.
    pub is_down: bool,
    /// Current circuit-breaker status.
    pub circuit_status: CircuitStatus,
}

/// Response body for `GET /routing/analytics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    /// Global aggregate metrics.
    pub global: GlobalMetrics,
    /// Per-provider metrics, keyed by provider name. Only includes
    /// providers that have handled at least one request.
    pub providers: HashMap<String, ProviderMetrics>,
}
