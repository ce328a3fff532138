//! The provider capability contract.

use async_trait::async_trait;

use gateway_core::{ChatResponse, GatewayResult};

/// Something that can answer a chat prompt.
///
/// Implementations are expected to call the rate limiter on entry (the
/// router only gates on the circuit breaker and user budget; per-call
/// admission is the provider's own responsibility, so a provider that
/// doesn't need rate limiting can skip it).
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// This provider's catalog name.
    fn name(&self) -> &str;

    /// Answer `prompt`, aborting if it would take longer than
    /// `timeout_ms`.
    ///
    /// # Errors
    /// Returns [`gateway_core::GatewayError::RateLimited`] if this
    /// provider's rolling window is exhausted, or any other
    /// [`gateway_core::GatewayError`] variant for upstream failures
    /// (including a timeout).
    async fn chat(&self, prompt: &str, timeout_ms: u32) -> GatewayResult<ChatResponse>;
}
