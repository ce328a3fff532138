//! The router orchestrator: budget gate, selection, and the fallback
//! chain across candidate providers.

use std::sync::Arc;

use gateway_core::{ChatRequest, ChatResponse, GatewayError, GatewayResult};
use gateway_providers::ProviderRegistry;
use gateway_resilience::CircuitBreaker;
use gateway_state::StateStore;

use crate::strategy::{SelectionStrategy, StrategyConfig};

/// Router-wide tuning: the user budget cap plus the selection
/// strategy's boost configuration.
#[derive(Debug, Clone, Copy)]
pub struct RouterConfig {
    /// Per-user dollar spend ceiling, checked before routing begins.
    pub user_budget_cap: f64,
    /// Selection strategy boost multipliers.
    pub strategy: StrategyConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            user_budget_cap: 1.00,
            strategy: StrategyConfig::default(),
        }
    }
}

/// Ties together the state store, circuit breaker, provider registry,
/// and selection strategy into the end-to-end `handle_request`
/// pipeline.
pub struct RouterService {
    store: Arc<StateStore>,
    breaker: Arc<CircuitBreaker>,
    providers: Arc<ProviderRegistry>,
    strategy: SelectionStrategy,
    config: RouterConfig,
}

impl RouterService {
    /// Construct a router over the given collaborators.
    #[must_use]
    pub fn new(
        store: Arc<StateStore>,
        breaker: Arc<CircuitBreaker>,
        providers: Arc<ProviderRegistry>,
        config: RouterConfig,
    ) -> Self {
        Self {
            store,
            breaker,
            providers,
            strategy: SelectionStrategy::new(config.strategy),
            config,
        }
    }

    /// Handle one chat request end to end.
    ///
    /// # Errors
    /// - [`GatewayError::BudgetExceeded`] if the user is already over
    ///   their cap (checked before any provider is touched).
    /// - [`GatewayError::ServiceUnavailable`] if selection yields no
    ///   candidates, or every candidate's call fails.
    pub async fn handle_request(&self, req: &ChatRequest) -> GatewayResult<ChatResponse> {
        if let Some(user_id) = &req.user_id {
            let spend = self.store.get_user_spend(user_id);
            if spend > self.config.user_budget_cap {
                return Err(GatewayError::BudgetExceeded {
                    user_id: user_id.clone(),
                    spend,
                });
            }
        }

        let catalog = self.providers.catalog().all();
        let candidates = self.strategy.select_providers(
            &req.prompt,
            &req.preferences,
            catalog,
            &self.store,
            &self.breaker,
        );

        if candidates.is_empty() {
            return Err(GatewayError::ServiceUnavailable);
        }

        for candidate in &candidates {
            let Some(client) = self.providers.get(&candidate.name) else {
                continue;
            };

            let timeout = std::time::Duration::from_millis(u64::from(req.preferences.timeout_ms));
            let outcome = match tokio::time::timeout(timeout, client.chat(&req.prompt, req.preferences.timeout_ms)).await {
                Ok(result) => result,
                Err(_) => Err(GatewayError::provider_failure(
                    &candidate.name,
                    format!("timed out after {}ms", req.preferences.timeout_ms),
                )),
            };

            match outcome {
                Ok(resp) => {
                    self.breaker.record_outcome(&candidate.name, true);
                    self.store.record_request_metrics(
                        &candidate.name,
                        resp.latency_ms,
                        resp.cost,
                        true,
                    );
                    if let Some(user_id) = &req.user_id {
                        self.store.add_user_spend(user_id, resp.cost);
                    }
                    return Ok(resp);
                }
                Err(err) if err.is_rate_limited() => {
                    self.store
                        .record_request_metrics(&candidate.name, 0, 0.0, false);
                }
                Err(_) => {
                    self.breaker.record_outcome(&candidate.name, false);
                    self.store
                        .record_request_metrics(&candidate.name, 0, 0.0, false);
                }
            }
        }

        Err(GatewayError::ServiceUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::UserPreference;
    use gateway_providers::ProviderCatalog;
    use gateway_resilience::CircuitBreakerConfig;
    use std::io::Write;

    fn catalog_with(contents: &str) -> ProviderCatalog {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        ProviderCatalog::load_from_path(file.path()).unwrap()
    }

    fn router(catalog: ProviderCatalog, failure_rate: f64) -> RouterService {
        let store = Arc::new(StateStore::new());
        let breaker = Arc::new(CircuitBreaker::new(store.clone(), CircuitBreakerConfig::default()));
        let providers = Arc::new(ProviderRegistry::new(catalog, store.clone(), failure_rate));
        RouterService::new(store, breaker, providers, RouterConfig::default())
    }

    #[tokio::test]
    async fn budget_exceeded_blocks_before_any_provider_call() {
        let catalog = catalog_with(
            "a:\n  model: m\n  cost_per_token: 0.0001\n  latency_ms: 1\n  rate_limit_rpm: 100\n  specialties: []\n  quality_score: 0.5\n",
        );
        let svc = router(catalog, 0.0);
        svc.store.add_user_spend("u1", 1.50);

        let req = ChatRequest {
            prompt: "hello".into(),
            preferences: UserPreference::default(),
            user_id: Some("u1".into()),
        };
        let err = svc.handle_request(&req).await.unwrap_err();
        assert!(matches!(err, GatewayError::BudgetExceeded { .. }));
        assert_eq!(svc.store.get_global_metrics().total_requests, 0);
    }

    #[tokio::test]
    async fn successful_call_records_metrics_and_spend() {
        let catalog = catalog_with(
            "a:\n  model: m\n  cost_per_token: 0.0001\n  latency_ms: 1\n  rate_limit_rpm: 100\n  specialties: []\n  quality_score: 0.5\n",
        );
        let svc = router(catalog, 0.0);

        let req = ChatRequest {
            prompt: "hello".into(),
            preferences: UserPreference::default(),
            user_id: Some("u1".into()),
        };
        let resp = svc.handle_request(&req).await.unwrap();
        assert_eq!(resp.provider_used, "a");
        assert!(svc.store.get_user_spend("u1") > 0.0);
        assert_eq!(svc.store.get_global_metrics().total_success, 1);
    }

    #[tokio::test]
    async fn falls_back_to_secondary_when_primary_down() {
        let catalog = catalog_with(
            "a:\n  model: m\n  cost_per_token: 0.0001\n  latency_ms: 1\n  rate_limit_rpm: 100\n  specialties: []\n  quality_score: 0.5\nb:\n  model: m\n  cost_per_token: 0.0002\n  latency_ms: 1\n  rate_limit_rpm: 100\n  specialties: []\n  quality_score: 0.5\n",
        );
        let svc = router(catalog, 0.0);
        svc.store.set_provider_down("a", true);

        let req = ChatRequest {
            prompt: "hello".into(),
            preferences: UserPreference::default(),
            user_id: None,
        };
        let resp = svc.handle_request(&req).await.unwrap();
        assert_eq!(resp.provider_used, "b");
    }

    #[tokio::test]
    async fn exhausted_candidates_yield_service_unavailable() {
        let catalog = catalog_with(
            "a:\n  model: m\n  cost_per_token: 0.0001\n  latency_ms: 1\n  rate_limit_rpm: 100\n  specialties: []\n  quality_score: 0.5\n",
        );
        let svc = router(catalog, 1.0);

        let req = ChatRequest {
            prompt: "hello".into(),
            preferences: UserPreference::default(),
            user_id: None,
        };
        let err = svc.handle_request(&req).await.unwrap_err();
        assert!(matches!(err, GatewayError::ServiceUnavailable));
    }

    #[tokio::test]
    async fn rate_limited_failure_does_not_trip_breaker() {
        let catalog = catalog_with(
            "a:\n  model: m\n  cost_per_token: 0.0001\n  latency_ms: 1\n  rate_limit_rpm: 1\n  specialties: []\n  quality_score: 0.5\n",
        );
        let svc = router(catalog, 0.0);
        let req = ChatRequest {
            prompt: "hello".into(),
            preferences: UserPreference::default(),
            user_id: None,
        };

        // First call exhausts the rpm=1 window inside the mock provider.
        svc.handle_request(&req).await.unwrap();
        for _ in 0..10 {
            let _ = svc.handle_request(&req).await;
        }

        assert_eq!(svc.breaker.get_status("a"), gateway_core::CircuitStatus::Closed);
    }

    #[tokio::test]
    async fn slow_provider_times_out_and_counts_as_a_failure() {
        let catalog = catalog_with(
            "a:\n  model: m\n  cost_per_token: 0.0001\n  latency_ms: 200\n  rate_limit_rpm: 100\n  specialties: []\n  quality_score: 0.5\n",
        );
        let svc = router(catalog, 0.0);
        let req = ChatRequest {
            prompt: "hello".into(),
            preferences: UserPreference {
                timeout_ms: 10,
                ..Default::default()
            },
            user_id: None,
        };

        let err = svc.handle_request(&req).await.unwrap_err();
        assert!(matches!(err, GatewayError::ServiceUnavailable));
        assert_eq!(svc.store.get_global_metrics().total_failures, 1);
        assert_eq!(svc.breaker.get_status("a"), gateway_core::CircuitStatus::Closed);
    }
}
