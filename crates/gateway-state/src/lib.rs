//! # Gateway State
//!
//! The shared in-memory state store: provider health, circuit-breaker
//! counters, rate-limit windows, per-provider metrics, and user spend.
//!
//! The store's contract is **serializable access**: each public operation
//! is atomic with respect to every other. This implementation shards by
//! provider name (via [`dashmap::DashMap`]) rather than using a single
//! global lock — the per-provider critical sections stay tiny, and no
//! operation here ever needs to hold two different providers' locks at
//! once, so sharding preserves the snapshot contract spec.md §4.1 allows.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod store;

pub use clock::now_unix;
pub use store::StateStore;

use gateway_core::ProviderDynamicState;

/// Per-provider metrics as stored (pre-enrichment — no live breaker
/// status attached). [`gateway-telemetry`]'s metrics service joins this
/// with [`ProviderDynamicState`] and the circuit breaker's status.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredProviderMetrics {
    /// Requests handled.
    pub requests: u64,
    /// Successful requests.
    pub success: u64,
    /// Failed requests.
    pub failures: u64,
    /// Sum of latency (ms) over successful requests only.
    pub latency_sum: f64,
}

impl StoredProviderMetrics {
    /// `success / requests`, or `1.0` if `requests == 0`.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.requests == 0 {
            1.0
        } else {
            self.success as f64 / self.requests as f64
        }
    }

    /// `latency_sum / success`, or `0.0` if `success == 0`.
    #[must_use]
    pub fn avg_latency_ms(&self) -> f64 {
        if self.success == 0 {
            0.0
        } else {
            self.latency_sum / self.success as f64
        }
    }
}

/// Process-wide aggregate counters, as stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredGlobalMetrics {
    /// Total requests across all providers.
    pub total_requests: u64,
    /// Total successful requests.
    pub total_success: u64,
    /// Total failed requests.
    pub total_failures: u64,
    /// Sum of latency (ms) over successful requests only.
    pub total_latency_sum: f64,
    /// Total dollar cost over successful requests only.
    pub total_cost: f64,
}

impl StoredGlobalMetrics {
    /// `total_success / total_requests`, or `1.0` if no requests yet.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            1.0
        } else {
            self.total_success as f64 / self.total_requests as f64
        }
    }

    /// `total_latency_sum / total_success`, or `0.0` if no successes yet.
    #[must_use]
    pub fn avg_latency_ms(&self) -> f64 {
        if self.total_success == 0 {
            0.0
        } else {
            self.total_latency_sum / self.total_success as f64
        }
    }
}

/// Default-valued snapshot used by callers before a provider has ever
/// been referenced (all state is created lazily on first write, per
/// spec.md §3's lifecycle rule).
#[must_use]
pub fn default_dynamic_state() -> ProviderDynamicState {
    ProviderDynamicState::default()
}
