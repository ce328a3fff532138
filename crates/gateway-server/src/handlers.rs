//! HTTP request handlers for the gateway API.

use axum::{extract::State, http::header, response::IntoResponse, Json};
use gateway_core::{ChatRequest, ChatResponse, GatewayError, ProviderStatus};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

/// `GET /` service-info body.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    /// Human-readable service name.
    pub name: String,
    /// Crate version.
    pub version: String,
    /// Short description of what this service does.
    pub description: String,
}

/// `GET /`
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "llm-routing-gateway".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Routes chat completions across LLM providers with failover".to_string(),
    })
}

/// `GET /health` body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` if at least one provider is up and available, else `degraded`.
    pub status: String,
    /// Count of providers currently up and available.
    pub providers_available: usize,
    /// Total providers in the catalog.
    pub providers_total: usize,
    /// Crate version.
    pub version: String,
}

/// `GET /health`
///
/// A provider counts as available when it isn't administratively marked
/// down and its circuit breaker admits it. This deliberately uses
/// [`gateway_resilience::CircuitBreaker::is_available`] rather than the
/// pure `get_status`, so a health probe can consume a HALF_OPEN provider's
/// single probe slot just like a real request would.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = state.providers.catalog().all();
    let available = catalog
        .iter()
        .filter(|spec| {
            let dyn_state = state.store.get_provider_state(&spec.name);
            !dyn_state.is_down && state.breaker.is_available(&spec.name)
        })
        .count();

    Json(HealthResponse {
        status: if available > 0 { "healthy" } else { "degraded" }.to_string(),
        providers_available: available,
        providers_total: catalog.len(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /livez`
pub async fn liveness() -> &'static str {
    "alive"
}

/// `GET /metrics` — Prometheus text exposition.
pub async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.gather_prometheus(),
    )
}

/// `POST /chat/completions`
#[instrument(skip(state, body), fields(prompt_len = body.prompt.len()))]
pub async fn chat_completions(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    body.validate()?;

    let response = state.router.handle_request(&body).await?;

    info!(provider = %response.provider_used, cost = response.cost, "chat completion served");
    Ok(Json(response))
}

/// `GET /providers`
pub async fn list_providers(State(state): State<AppState>) -> Json<Vec<ProviderStatus>> {
    let provider_metrics = state.metrics.provider_metrics();

    let statuses = state
        .providers
        .catalog()
        .all()
        .iter()
        .map(|spec| {
            let dyn_state = state.store.get_provider_state(&spec.name);
            let success_rate = provider_metrics
                .get(&spec.name)
                .map_or(1.0, |m| m.success_rate);

            ProviderStatus {
                spec: spec.clone(),
                is_down: dyn_state.is_down,
                circuit_status: state.breaker.get_status(&spec.name),
                success_rate,
            }
        })
        .collect();

    Json(statuses)
}

/// `GET /routing/analytics`
pub async fn analytics(State(state): State<AppState>) -> Json<gateway_core::AnalyticsResponse> {
    Json(state.metrics.analytics())
}

/// `POST /simulate/failure` body.
#[derive(Debug, Deserialize)]
pub struct SimulateFailureRequest {
    /// Name of the provider to mark up or down.
    pub provider: String,
    /// Target `is_down` value.
    pub down: bool,
}

/// `POST /simulate/failure` response.
#[derive(Debug, Serialize)]
pub struct SimulateFailureResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// `POST /simulate/failure`
///
/// Administrative override used to exercise failover and circuit-breaker
/// behavior without waiting for real upstream failures.
pub async fn simulate_failure(
    State(state): State<AppState>,
    Json(body): Json<SimulateFailureRequest>,
) -> Result<Json<SimulateFailureResponse>, ApiError> {
    if state.providers.catalog().get(&body.provider).is_none() {
        return Err(GatewayError::not_found(body.provider).into());
    }

    state.store.set_provider_down(&body.provider, body.down);

    Ok(Json(SimulateFailureResponse {
        message: format!("provider {} set to down={}", body.provider, body.down),
    }))
}
