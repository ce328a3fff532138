use dashmap::DashMap;
use parking_lot::Mutex;

use gateway_core::{GatewayError, GatewayResult, ProviderDynamicState};

use crate::clock::now_unix;
use crate::{StoredGlobalMetrics, StoredProviderMetrics};

/// All mutable per-provider fields in one record, so a single shard lock
/// covers every field a given operation might touch.
#[derive(Debug, Clone, Copy, Default)]
struct ProviderRecord {
    is_down: bool,
    consecutive_failures: u32,
    open_until_ts: f64,
    half_open_probe_in_flight: bool,

    rate_window_start: f64,
    rate_window_count: u32,

    requests: u64,
    success: u64,
    failures: u64,
    latency_sum: f64,
}

/// The process-wide shared state store.
///
/// Sharded by provider name: each provider's fields live behind one
/// [`dashmap`] shard lock, so concurrent callers touching different
/// providers never contend, while operations on the *same* provider are
/// still serialized. Global counters and user spend live behind their
/// own small locks.
#[derive(Debug, Default)]
pub struct StateStore {
    providers: DashMap<String, ProviderRecord>,
    user_spend: DashMap<String, f64>,
    global: Mutex<StoredGlobalMetrics>,
}

impl StateStore {
    /// Create an empty store. All provider/user state is created lazily
    /// on first reference.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a provider's dynamic state. Returns defaults if the
    /// provider has never been referenced.
    #[must_use]
    pub fn get_provider_state(&self, name: &str) -> ProviderDynamicState {
        let rec = self.providers.entry(name.to_string()).or_default();
        ProviderDynamicState {
            is_down: rec.is_down,
            consecutive_failures: rec.consecutive_failures,
            open_until_ts: rec.open_until_ts,
            half_open_probe_in_flight: rec.half_open_probe_in_flight,
        }
    }

    /// Administratively mark a provider up or down.
    pub fn set_provider_down(&self, name: &str, down: bool) {
        self.providers.entry(name.to_string()).or_default().is_down = down;
    }

    /// Increment consecutive failure count.
    pub fn record_failure(&self, name: &str) {
        self.providers
            .entry(name.to_string())
            .or_default()
            .consecutive_failures += 1;
    }

    /// Reset consecutive failure count to zero.
    pub fn record_success(&self, name: &str) {
        self.providers
            .entry(name.to_string())
            .or_default()
            .consecutive_failures = 0;
    }

    /// Set the instant at which the OPEN phase ends.
    pub fn set_circuit_open(&self, name: &str, open_until_ts: f64) {
        self.providers
            .entry(name.to_string())
            .or_default()
            .open_until_ts = open_until_ts;
    }

    /// Clear the OPEN phase (`open_until_ts = 0`).
    pub fn clear_circuit_open(&self, name: &str) {
        self.providers
            .entry(name.to_string())
            .or_default()
            .open_until_ts = 0.0;
    }

    /// Set or clear the at-most-one HALF_OPEN probe token.
    pub fn set_half_open_probe(&self, name: &str, in_flight: bool) {
        self.providers
            .entry(name.to_string())
            .or_default()
            .half_open_probe_in_flight = in_flight;
    }

    /// Atomically claim the HALF_OPEN probe token: `true` if this call
    /// claimed it (the flag was false and is now true), `false` if
    /// another caller already holds it.
    ///
    /// Read-and-set happens under one shard lock, so concurrent callers
    /// racing here never both win — the invariant the breaker needs to
    /// admit at most one in-flight probe.
    pub fn try_acquire_half_open_probe(&self, name: &str) -> bool {
        let mut rec = self.providers.entry(name.to_string()).or_default();
        if rec.half_open_probe_in_flight {
            false
        } else {
            rec.half_open_probe_in_flight = true;
            true
        }
    }

    /// Current total spend for a user, `0.0` if never referenced.
    #[must_use]
    pub fn get_user_spend(&self, user_id: &str) -> f64 {
        self.user_spend.get(user_id).map_or(0.0, |v| *v)
    }

    /// Add to a user's total spend.
    pub fn add_user_spend(&self, user_id: &str, cost: f64) {
        *self.user_spend.entry(user_id.to_string()).or_insert(0.0) += cost;
    }

    /// Record the outcome of a provider call: bumps per-provider and
    /// global counters per the invariants in spec.md §3 — `latency_sum`
    /// and `cost` only accumulate on success.
    pub fn record_request_metrics(&self, name: &str, latency_ms: u32, cost: f64, success: bool) {
        {
            let mut rec = self.providers.entry(name.to_string()).or_default();
            rec.requests += 1;
            if success {
                rec.success += 1;
                rec.latency_sum += f64::from(latency_ms);
            } else {
                rec.failures += 1;
            }
        }

        let mut global = self.global.lock();
        global.total_requests += 1;
        if success {
            global.total_success += 1;
            global.total_latency_sum += f64::from(latency_ms);
            global.total_cost += cost;
        } else {
            global.total_failures += 1;
        }
    }

    /// Fixed-start 60-second rolling window, admitting up to `rpm_limit`
    /// calls per window.
    ///
    /// # Errors
    /// Returns [`GatewayError::RateLimited`] if this call would be the
    /// `(rpm_limit + 1)`-th within the current window.
    pub fn check_and_increment_rate_limit(&self, name: &str, rpm_limit: u32) -> GatewayResult<()> {
        let mut rec = self.providers.entry(name.to_string()).or_default();
        let now = now_unix();

        if now - rec.rate_window_start >= 60.0 {
            rec.rate_window_start = now;
            rec.rate_window_count = 0;
        }

        rec.rate_window_count += 1;

        if rec.rate_window_count > rpm_limit {
            return Err(GatewayError::rate_limited(name));
        }
        Ok(())
    }

    /// Process-wide aggregate counters.
    #[must_use]
    pub fn get_global_metrics(&self) -> StoredGlobalMetrics {
        *self.global.lock()
    }

    /// Per-provider metrics for every provider that has handled at least
    /// one request. Unenriched — no live breaker status attached; see
    /// `gateway-telemetry::MetricsService` for the enriched view.
    #[must_use]
    pub fn get_provider_metrics(&self) -> std::collections::HashMap<String, StoredProviderMetrics> {
        self.providers
            .iter()
            .filter(|entry| entry.requests > 0)
            .map(|entry| {
                let rec = *entry.value();
                (
                    entry.key().clone(),
                    StoredProviderMetrics {
                        requests: rec.requests,
                        success: rec.success,
                        failures: rec.failures,
                        latency_sum: rec.latency_sum,
                    },
                )
            })
            .collect()
    }

    /// Test hook: zero everything.
    pub fn reset(&self) {
        self.providers.clear();
        self.user_spend.clear();
        *self.global.lock() = StoredGlobalMetrics::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_provider_has_default_state() {
        let store = StateStore::new();
        let state = store.get_provider_state("ghost");
        assert!(!state.is_down);
        assert_eq!(state.consecutive_failures, 0);
        assert_eq!(state.open_until_ts, 0.0);
        assert!(!state.half_open_probe_in_flight);
    }

    #[test]
    fn user_spend_accumulates() {
        let store = StateStore::new();
        assert_eq!(store.get_user_spend("u1"), 0.0);
        store.add_user_spend("u1", 0.5);
        store.add_user_spend("u1", 0.25);
        assert_eq!(store.get_user_spend("u1"), 0.75);
    }

    #[test]
    fn record_success_resets_consecutive_failures() {
        let store = StateStore::new();
        store.record_failure("p");
        store.record_failure("p");
        assert_eq!(store.get_provider_state("p").consecutive_failures, 2);
        store.record_success("p");
        assert_eq!(store.get_provider_state("p").consecutive_failures, 0);
    }

    #[test]
    fn metrics_round_trip_matches_invariants() {
        let store = StateStore::new();
        store.record_request_metrics("p", 200, 0.001, true);
        store.record_request_metrics("p", 0, 0.0, false);
        store.record_request_metrics("p", 300, 0.002, true);

        let global = store.get_global_metrics();
        assert_eq!(global.total_requests, 3);
        assert_eq!(global.total_success, 2);
        assert_eq!(global.total_failures, 1);
        assert!((global.avg_latency_ms() - 250.0).abs() < 1e-9);
        assert!((global.success_rate() - 2.0 / 3.0).abs() < 1e-9);
        assert!((global.total_cost - 0.003).abs() < 1e-9);

        let per_provider = store.get_provider_metrics();
        let p = per_provider.get("p").unwrap();
        assert_eq!(p.requests, 3);
        assert!((p.avg_latency_ms() - 250.0).abs() < 1e-9);
    }

    #[test]
    fn provider_metrics_excludes_untouched_providers() {
        let store = StateStore::new();
        store.get_provider_state("never-called");
        assert!(store.get_provider_metrics().is_empty());
    }

    #[test]
    fn rate_limit_admits_exactly_rpm_calls_per_window() {
        let store = StateStore::new();
        for _ in 0..5 {
            assert!(store.check_and_increment_rate_limit("p", 5).is_ok());
        }
        assert!(store.check_and_increment_rate_limit("p", 5).is_err());
    }

    #[test]
    fn half_open_probe_admits_exactly_one_claimant() {
        let store = StateStore::new();
        assert!(store.try_acquire_half_open_probe("p"));
        assert!(!store.try_acquire_half_open_probe("p"));
        store.set_half_open_probe("p", false);
        assert!(store.try_acquire_half_open_probe("p"));
    }

    #[test]
    fn reset_zeroes_everything() {
        let store = StateStore::new();
        store.record_failure("p");
        store.add_user_spend("u", 1.0);
        store.record_request_metrics("p", 100, 0.1, true);
        store.reset();

        assert_eq!(store.get_provider_state("p").consecutive_failures, 0);
        assert_eq!(store.get_user_spend("u"), 0.0);
        assert_eq!(store.get_global_metrics().total_requests, 0);
        assert!(store.get_provider_metrics().is_empty());
    }
}
