//! The metrics service: a thin facade over the state store's counters,
//! enriched at read time with live circuit-breaker status.

use std::collections::HashMap;
use std::sync::Arc;

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

use gateway_core::{AnalyticsResponse, GlobalMetrics, ProviderMetrics};
use gateway_resilience::CircuitBreaker;
use gateway_state::StateStore;

/// Read-side facade joining the state store's raw counters with the
/// breaker's live status. Holds no state of its own.
pub struct MetricsService {
    store: Arc<StateStore>,
    breaker: Arc<CircuitBreaker>,
}

impl MetricsService {
    /// Wrap the given store and breaker.
    #[must_use]
    pub fn new(store: Arc<StateStore>, breaker: Arc<CircuitBreaker>) -> Self {
        Self { store, breaker }
    }

    /// Process-wide aggregate metrics.
    #[must_use]
    pub fn global_metrics(&self) -> GlobalMetrics {
        let g = self.store.get_global_metrics();
        GlobalMetrics {
            total_requests: g.total_requests,
            total_success: g.total_success,
            total_failures: g.total_failures,
            avg_latency_ms: g.avg_latency_ms(),
            total_cost: g.total_cost,
            success_rate: g.success_rate(),
        }
    }

    /// Per-provider metrics, enriched with `is_down` and live circuit
    /// status — only providers that have handled at least one request.
    #[must_use]
    pub fn provider_metrics(&self) -> HashMap<String, ProviderMetrics> {
        self.store
            .get_provider_metrics()
            .into_iter()
            .map(|(name, stored)| {
                let dyn_state = self.store.get_provider_state(&name);
                let metrics = ProviderMetrics {
                    requests: stored.requests,
                    success: stored.success,
                    failures: stored.failures,
                    success_rate: stored.success_rate(),
                    avg_latency_ms: stored.avg_latency_ms(),
                    is_down: dyn_state.is_down,
                    circuit_status: self.breaker.get_status(&name),
                };
                (name, metrics)
            })
            .collect()
    }

    /// The combined analytics response served by `GET /routing/analytics`.
    #[must_use]
    pub fn analytics(&self) -> AnalyticsResponse {
        AnalyticsResponse {
            global: self.global_metrics(),
            providers: self.provider_metrics(),
        }
    }

    /// Render current metrics in Prometheus text exposition format.
    ///
    /// Builds a fresh [`Registry`] per call rather than maintaining
    /// long-lived counters — the state store is already the source of
    /// truth, so this just projects its current snapshot.
    #[must_use]
    pub fn gather_prometheus(&self) -> String {
        let registry = Registry::new();

        let global = self.global_metrics();
        let global_requests =
            GaugeVec::new(Opts::new("gateway_requests_total", "total requests handled"), &[])
                .expect("static metric options");
        global_requests.with_label_values(&[]).set(global.total_requests as f64);
        let _ = registry.register(Box::new(global_requests));

        let global_cost =
            GaugeVec::new(Opts::new("gateway_cost_total_usd", "total cost in USD"), &[])
                .expect("static metric options");
        global_cost.with_label_values(&[]).set(global.total_cost);
        let _ = registry.register(Box::new(global_cost));

        let provider_requests = GaugeVec::new(
            Opts::new("gateway_provider_requests_total", "requests per provider"),
            &["provider"],
        )
        .expect("static metric options");
        let provider_success_rate = GaugeVec::new(
            Opts::new("gateway_provider_success_rate", "success rate per provider"),
            &["provider"],
        )
        .expect("static metric options");
        let provider_down = GaugeVec::new(
            Opts::new("gateway_provider_down", "1 if administratively marked down"),
            &["provider"],
        )
        .expect("static metric options");

        for (name, metrics) in self.provider_metrics() {
            provider_requests
                .with_label_values(&[&name])
                .set(metrics.requests as f64);
            provider_success_rate
                .with_label_values(&[&name])
                .set(metrics.success_rate);
            provider_down
                .with_label_values(&[&name])
                .set(f64::from(u8::from(metrics.is_down)));
        }
        let _ = registry.register(Box::new(provider_requests));
        let _ = registry.register(Box::new(provider_success_rate));
        let _ = registry.register(Box::new(provider_down));

        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        let _ = encoder.encode(&registry.gather(), &mut buffer);
        String::from_utf8(buffer).unwrap_or_default()
    }
}
