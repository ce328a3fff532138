//! End-to-end HTTP tests driving the gateway's full axum router.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use gateway_config::GatewayConfig;
use gateway_providers::ProviderCatalog;
use gateway_server::{create_router, AppState};
use serde_json::{json, Value};
use std::io::Write;
use tower::ServiceExt;

fn catalog_with(contents: &str) -> ProviderCatalog {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    ProviderCatalog::load_from_path(file.path()).unwrap()
}

fn two_provider_catalog() -> ProviderCatalog {
    catalog_with(
        r"
openai:
  model: gpt-5
  cost_per_token: 0.00003
  latency_ms: 200
  rate_limit_rpm: 60
  specialties: [code, writing]
  quality_score: 0.95
google:
  model: gemini-3-pro
  cost_per_token: 0.000015
  latency_ms: 150
  rate_limit_rpm: 60
  specialties: [analysis]
  quality_score: 0.9
",
    )
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn root_and_health_are_reachable() {
    let state = AppState::builder()
        .config(GatewayConfig::default())
        .catalog(two_provider_catalog())
        .build();
    let app = create_router(state);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["providers_total"], 2);
}

#[tokio::test]
async fn chat_completion_round_trips_through_router() {
    let mut config = GatewayConfig::default();
    config.mock_failure_rate = 0.0;
    let state = AppState::builder()
        .config(config)
        .catalog(two_provider_catalog())
        .build();
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat/completions")
                .header("content-type", "application/json")
                .body(Body::from(json!({"prompt": "summarize this blog post"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["provider_used"].is_string());
}

#[tokio::test]
async fn budget_gate_blocks_before_any_provider_call() {
    let mut config = GatewayConfig::default();
    config.mock_failure_rate = 0.0;
    config.user_budget_cap = 1.00;
    let state = AppState::builder()
        .config(config)
        .catalog(two_provider_catalog())
        .build();
    state.store.add_user_spend("u1", 1.50);
    let app = create_router(state.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat/completions")
                .header("content-type", "application/json")
                .body(Body::from(json!({"prompt": "hello", "user_id": "u1"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    assert_eq!(state.store.get_global_metrics().total_requests, 0);
}

#[tokio::test]
async fn fallback_chain_drops_providers_available_on_health() {
    let mut config = GatewayConfig::default();
    config.mock_failure_rate = 0.0;
    let state = AppState::builder()
        .config(config)
        .catalog(two_provider_catalog())
        .build();
    let app = create_router(state.clone());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/simulate/failure")
                .header("content-type", "application/json")
                .body(Body::from(json!({"provider": "openai", "down": true}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["providers_available"], 1);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat/completions")
                .header("content-type", "application/json")
                .body(Body::from(json!({"prompt": "hello"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["provider_used"], "google");
}

#[tokio::test]
async fn all_providers_exhausted_yields_503() {
    let mut config = GatewayConfig::default();
    config.mock_failure_rate = 1.0;
    let state = AppState::builder()
        .config(config)
        .catalog(two_provider_catalog())
        .build();
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat/completions")
                .header("content-type", "application/json")
                .body(Body::from(json!({"prompt": "hello"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn analytics_and_providers_endpoints_reflect_activity() {
    let mut config = GatewayConfig::default();
    config.mock_failure_rate = 0.0;
    let state = AppState::builder()
        .config(config)
        .catalog(two_provider_catalog())
        .build();
    let app = create_router(state);

    let _ = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat/completions")
                .header("content-type", "application/json")
                .body(Body::from(json!({"prompt": "hello"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/routing/analytics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["global"]["total_requests"], 1);

    let response = app
        .oneshot(Request::builder().uri("/providers").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}
