//! SuitOps API Server
//!
//! REST API for the EVA suit mission console: telemetry with alert
//! evaluation, alert acknowledgement, countdown timers, tool dispatch for
//! the assistant loop, and a full demo-state restart.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod config;
mod routes;

pub use config::ServerConfig;
use mission_store::MissionStore;

/// Application state shared across handlers
pub struct AppState {
    /// All mutable demo state (simulator + alert engine + timers)
    pub store: MissionStore,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state with a seeded telemetry walk
    pub fn new(seed: u64) -> Self {
        Self {
            store: MissionStore::new(seed),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Shared handle used by every route handler.
pub type SharedState = Arc<RwLock<AppState>>;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub metrics: StoreMetrics,
}

/// Counters describing the demo store
#[derive(Debug, Serialize)]
pub struct StoreMetrics {
    pub active_timers: usize,
    pub acknowledged_alerts: usize,
}

/// Create the application router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/telemetry", get(routes::telemetry::get_telemetry))
        .route("/api/v1/alerts/ack", post(routes::alerts::acknowledge))
        .route(
            "/api/v1/timers",
            get(routes::timers::list).post(routes::timers::start),
        )
        .route("/api/v1/tools", post(routes::tools::invoke))
        .route("/api/v1/chat", post(routes::chat::chat))
        .route("/api/v1/restart", post(routes::restart::restart))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        metrics: StoreMetrics {
            active_timers: state.store.timer_count(),
            acknowledged_alerts: state.store.acknowledged_count(),
        },
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(RwLock::new(AppState::new(config.telemetry_seed)));
    let app = create_router(state);

    info!("Starting API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn test_app() -> Router {
        create_router(Arc::new(RwLock::new(AppState::new(123))))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app();
        let response = app.oneshot(get_req("/api/v1/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["metrics"]["active_timers"], 0);
    }

    #[tokio::test]
    async fn test_telemetry_returns_snapshot_and_alerts() {
        let app = test_app();
        let response = app.oneshot(get_req("/api/v1/telemetry")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["telemetry"]["o2_primary_pct"].is_number());
        assert!(body["alerts"].is_array());
    }

    #[tokio::test]
    async fn test_acknowledge_unknown_kind_is_bad_request() {
        let app = test_app();
        let response = app
            .oneshot(post_json("/api/v1/alerts/ack", json!({ "id": "WARP_CORE" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("WARP_CORE"));
    }

    #[tokio::test]
    async fn test_acknowledge_known_kind() {
        let app = test_app();
        let response = app
            .oneshot(post_json("/api/v1/alerts/ack", json!({ "id": "O2_LOW" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["id"], "O2_LOW");
    }

    #[tokio::test]
    async fn test_timer_lifecycle() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/timers",
                json!({ "label": "prebreathe", "seconds": 300 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let id = body["id"].as_str().unwrap().to_string();
        assert_eq!(body["timers"].as_array().unwrap().len(), 1);

        let response = app.oneshot(get_req("/api/v1/timers")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["timers"][0]["id"], id.as_str());
        assert_eq!(body["timers"][0]["label"], "prebreathe");
    }

    #[tokio::test]
    async fn test_timer_validation_errors() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/timers",
                json!({ "label": "", "seconds": 30 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(post_json(
                "/api/v1/timers",
                json!({ "label": "x", "seconds": 0 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_tools_get_telemetry_with_fields() {
        let app = test_app();
        let response = app
            .oneshot(post_json(
                "/api/v1/tools",
                json!({
                    "name": "get_telemetry",
                    "arguments": { "fields": ["co2_ppm"] }
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["telemetry"]["co2_ppm"].is_number());
        assert!(body["telemetry"].get("heart_bpm").is_none());
    }

    #[tokio::test]
    async fn test_tools_unknown_name_is_bad_request() {
        let app = test_app();
        let response = app
            .oneshot(post_json(
                "/api/v1/tools",
                json!({ "name": "open_airlock", "arguments": {} }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_status_roundtrip() {
        let app = test_app();
        let response = app
            .oneshot(post_json(
                "/api/v1/chat",
                json!({ "messages": [{ "role": "user", "content": "status check" }] }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["messages"][0]["role"], "assistant");
        assert_eq!(body["toolCalls"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_restart_clears_state() {
        let app = test_app();

        app.clone()
            .oneshot(post_json(
                "/api/v1/timers",
                json!({ "label": "x", "seconds": 600 }),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/restart", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], true);

        let response = app.oneshot(get_req("/api/v1/timers")).await.unwrap();
        let body = body_json(response).await;
        assert!(body["timers"].as_array().unwrap().is_empty());
    }
}
