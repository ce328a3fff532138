//! Shared application state handed to every handler.

use std::sync::Arc;

use gateway_config::GatewayConfig;
use gateway_providers::{ProviderCatalog, ProviderRegistry};
use gateway_resilience::{CircuitBreaker, CircuitBreakerConfig};
use gateway_routing::{RouterConfig, RouterService};
use gateway_routing::StrategyConfig;
use gateway_state::StateStore;
use gateway_telemetry::MetricsService;

/// Everything a handler needs, cheap to clone (every field is an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Shared mutable state: provider dynamic state, spend, counters.
    pub store: Arc<StateStore>,
    /// Per-provider circuit breaker, layered over `store`.
    pub breaker: Arc<CircuitBreaker>,
    /// Provider catalog and client factory cache.
    pub providers: Arc<ProviderRegistry>,
    /// Read-side metrics facade.
    pub metrics: Arc<MetricsService>,
    /// The routing orchestrator.
    pub router: Arc<RouterService>,
    /// The resolved configuration this state was built from.
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    /// Start building an `AppState` from defaults.
    #[must_use]
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::default()
    }
}

/// Builder for [`AppState`], mirroring the rest of the workspace's
/// `T::builder()...build()` convention.
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<GatewayConfig>,
    catalog: Option<ProviderCatalog>,
}

impl AppStateBuilder {
    /// Supply the resolved configuration. Defaults apply if omitted.
    #[must_use]
    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Supply an already-loaded provider catalog. An empty catalog
    /// applies if omitted, which leaves the gateway with no providers
    /// to route to — fine for route-level tests, fatal in practice.
    #[must_use]
    pub fn catalog(mut self, catalog: ProviderCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Wire the collaborators together and produce the final state.
    #[must_use]
    pub fn build(self) -> AppState {
        let config = self.config.unwrap_or_default();
        let catalog = self.catalog.unwrap_or_default();

        let store = Arc::new(StateStore::new());
        let breaker = Arc::new(CircuitBreaker::new(
            store.clone(),
            CircuitBreakerConfig {
                failure_threshold: config.circuit_breaker_failure_threshold,
                open_duration_s: config.circuit_breaker_open_duration_s,
            },
        ));
        let providers = Arc::new(ProviderRegistry::new(
            catalog,
            store.clone(),
            config.mock_failure_rate,
        ));
        let metrics = Arc::new(MetricsService::new(store.clone(), breaker.clone()));
        let router = Arc::new(RouterService::new(
            store.clone(),
            breaker.clone(),
            providers.clone(),
            RouterConfig {
                user_budget_cap: config.user_budget_cap,
                strategy: StrategyConfig {
                    quality_boost: config.strategy_quality_boost,
                    cost_speed_boost: config.strategy_cost_speed_boost,
                },
            },
        ));

        AppState {
            store,
            breaker,
            providers,
            metrics,
            router,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_config_tuning_to_the_breaker() {
        let mut config = GatewayConfig::default();
        config.circuit_breaker_failure_threshold = 1;
        let state = AppState::builder().config(config).build();

        state.breaker.record_outcome("p", false);
        assert_eq!(state.breaker.get_status("p"), gateway_core::CircuitStatus::Open);
    }

    #[test]
    fn builder_defaults_to_an_empty_catalog() {
        let state = AppState::builder().build();
        assert!(state.providers.catalog().all().is_empty());
    }
}
