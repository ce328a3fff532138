//! Per-provider rolling rate limiter.
//!
//! Thin wrapper over [`gateway_state::StateStore::check_and_increment_rate_limit`] —
//! the window bookkeeping lives in the store so it shares the same
//! shard lock as the rest of a provider's counters. Called immediately
//! before every provider invocation.

use std::sync::Arc;

use gateway_core::GatewayResult;
use gateway_state::StateStore;

/// Enforces a fixed-start 60-second rolling window per provider.
pub struct RateLimiter {
    store: Arc<StateStore>,
}

impl RateLimiter {
    /// Wrap the given store.
    #[must_use]
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    /// Admit or reject a call against `name`'s `rpm_limit`.
    ///
    /// # Errors
    /// Returns [`gateway_core::GatewayError::RateLimited`] if this call
    /// would be the `(rpm_limit + 1)`-th within the current window.
    pub fn check(&self, name: &str, rpm_limit: u32) -> GatewayResult<()> {
        self.store.check_and_increment_rate_limit(name, rpm_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_up_to_limit_then_rejects() {
        let limiter = RateLimiter::new(Arc::new(StateStore::new()));
        for _ in 0..3 {
            assert!(limiter.check("p", 3).is_ok());
        }
        let err = limiter.check("p", 3).unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[test]
    fn separate_providers_have_independent_windows() {
        let limiter = RateLimiter::new(Arc::new(StateStore::new()));
        for _ in 0..2 {
            assert!(limiter.check("a", 2).is_ok());
        }
        assert!(limiter.check("a", 2).is_err());
        assert!(limiter.check("b", 2).is_ok());
    }
}
