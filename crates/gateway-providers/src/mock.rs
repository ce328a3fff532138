//! The built-in simulated provider.
//!
//! Real upstream HTTP clients are outside this crate's scope — the
//! gateway only ever talks to providers through [`ProviderClient`], and
//! `MockProvider` is the reference implementation: it checks its own
//! rate limit, sleeps for its configured nominal latency, and fails a
//! configurable fraction of the time.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use rand::Rng;

use gateway_core::{estimate_cost, ChatResponse, GatewayError, GatewayResult, ProviderSpec};
use gateway_state::StateStore;

use crate::client::ProviderClient;

/// A provider whose "upstream" is simulated locally: no network call is
/// made, but rate limiting, latency, and failure injection behave like
/// a real one.
pub struct MockProvider {
    spec: ProviderSpec,
    store: Arc<StateStore>,
    failure_rate: f64,
}

impl MockProvider {
    /// Build a mock provider over `spec`, sharing `store` with the rest
    /// of the gateway so its rate-limit window is the same one the
    /// breaker and metrics see.
    #[must_use]
    pub fn new(spec: ProviderSpec, store: Arc<StateStore>, failure_rate: f64) -> Self {
        Self {
            spec,
            store,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    fn name(&self) -> &str {
        &self.spec.name
    }

    async fn chat(&self, prompt: &str, _timeout_ms: u32) -> GatewayResult<ChatResponse> {
        let start = Instant::now();

        self.store
            .check_and_increment_rate_limit(&self.spec.name, self.spec.rate_limit_rpm)?;

        tokio::time::sleep(std::time::Duration::from_millis(u64::from(self.spec.latency_ms))).await;

        if rand::thread_rng().gen::<f64>() < self.failure_rate {
            return Err(GatewayError::provider_failure(
                &self.spec.name,
                format!("random failure from {}", self.spec.name),
            ));
        }

        let latency_ms = u32::try_from(start.elapsed().as_millis()).unwrap_or(u32::MAX);
        let cost = estimate_cost(&self.spec, prompt);
        let preview: String = prompt.chars().take(50).collect();

        Ok(ChatResponse {
            provider_used: self.spec.name.clone(),
            content: format!("Mock response from {}: {preview}...", self.spec.name),
            latency_ms,
            cost,
        })
    }
}
