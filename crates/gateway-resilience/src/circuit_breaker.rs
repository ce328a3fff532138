//! Circuit breaker pattern implementation.
//!
//! Per-provider `CLOSED`/`OPEN`/`HALF_OPEN` state machine layered directly
//! over [`gateway_state::StateStore`] — the breaker holds no state of its
//! own beyond its configuration, so every instance looking at the same
//! store and provider name agrees on status.

use std::sync::Arc;

use gateway_core::{CircuitStatus, ProviderDynamicState};
use gateway_state::{now_unix, StateStore};
use tracing::debug;

/// Circuit breaker tuning knobs. Defaults match the original service:
/// three consecutive failures trip the breaker, which stays open for a
/// minute.
#[derive(Debug, Clone, Copy)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures required to trip the breaker.
    pub failure_threshold: u32,
    /// Seconds the breaker stays open before allowing a probe.
    pub open_duration_s: u64,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            open_duration_s: 60,
        }
    }
}

/// Per-provider circuit breaker, backed by the shared state store.
///
/// Cheap to clone-by-reference: construct one and share it (it only
/// holds an `Arc<StateStore>` and a config copy).
pub struct CircuitBreaker {
    store: Arc<StateStore>,
    config: CircuitBreakerConfig,
}

impl CircuitBreaker {
    /// Create a breaker over the given store with the given config.
    #[must_use]
    pub fn new(store: Arc<StateStore>, config: CircuitBreakerConfig) -> Self {
        Self { store, config }
    }

    /// Create a breaker over the given store with default config.
    #[must_use]
    pub fn with_defaults(store: Arc<StateStore>) -> Self {
        Self::new(store, CircuitBreakerConfig::default())
    }

    /// Purely observational status derived from `(consecutive_failures,
    /// open_until_ts)`. No side effects — safe to call as often as
    /// needed (health checks, `/providers`, analytics).
    #[must_use]
    pub fn get_status(&self, name: &str) -> CircuitStatus {
        self.status_from(&self.store.get_provider_state(name))
    }

    fn status_from(&self, state: &ProviderDynamicState) -> CircuitStatus {
        if state.consecutive_failures < self.config.failure_threshold {
            CircuitStatus::Closed
        } else if now_unix() < state.open_until_ts {
            CircuitStatus::Open
        } else {
            CircuitStatus::HalfOpen
        }
    }

    /// Decide whether a call to `name` may proceed right now, claiming
    /// the HALF_OPEN probe token if this call is the one that gets to
    /// probe.
    ///
    /// CLOSED admits everything; OPEN admits nothing; HALF_OPEN admits
    /// exactly one concurrent caller (the state store's
    /// `try_acquire_half_open_probe` is the atomic compare-and-set that
    /// makes this safe under concurrency).
    #[must_use]
    pub fn is_available(&self, name: &str) -> bool {
        match self.status_from(&self.store.get_provider_state(name)) {
            CircuitStatus::Closed => true,
            CircuitStatus::Open => false,
            CircuitStatus::HalfOpen => self.store.try_acquire_half_open_probe(name),
        }
    }

    /// Record the outcome of a call that `is_available` admitted.
    ///
    /// Success fully resets the provider to CLOSED. Failure increments
    /// the consecutive-failure counter and, once at or above threshold,
    /// re-arms `open_until_ts` — including on a HALF_OPEN probe failure,
    /// so a flapping provider can't be reprobed without cooling down.
    pub fn record_outcome(&self, name: &str, success: bool) {
        if success {
            self.store.record_success(name);
            self.store.clear_circuit_open(name);
            self.store.set_half_open_probe(name, false);
            debug!(provider = name, "circuit breaker reset to closed");
            return;
        }

        self.store.record_failure(name);
        self.store.set_half_open_probe(name, false);

        let failures = self.store.get_provider_state(name).consecutive_failures;
        if failures >= self.config.failure_threshold {
            let open_until = now_unix() + self.config.open_duration_s as f64;
            self.store.set_circuit_open(name, open_until);
            debug!(
                provider = name,
                failures, open_until, "circuit breaker opened"
            );
        }
    }
}
