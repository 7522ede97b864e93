use crate::actors::LookupHandle;
use crate::models::{LookupState, LookupStats};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Application state for the HTTP surface
#[derive(Clone)]
pub struct AppState {
    pub lookup: LookupHandle,
    pub start_time: Instant,
}

/// Body of `POST /lookup`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub username: String,
}

/// Response for errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<LookupStats>,
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/lookup",
            get(get_lookup).post(submit_lookup).delete(clear_lookup),
        )
        .route("/stats", get(get_stats))
        .route("/healthz", get(health_check))
        .route("/livez", get(liveness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP surface
pub async fn start_server(app_state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_router(app_state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Lookup server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Current lookup state snapshot
async fn get_lookup(State(state): State<AppState>) -> Json<LookupState> {
    Json(state.lookup.state())
}

async fn submit_lookup(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Response {
    match state.lookup.submit(request.username).await {
        Ok(lookup_state) => {
            let status_code = if lookup_state.is_loading() {
                StatusCode::ACCEPTED
            } else {
                StatusCode::OK
            };
            (status_code, Json(lookup_state)).into_response()
        }
        Err(e) => controller_unavailable(e),
    }
}

/// Same as submitting an empty username
async fn clear_lookup(State(state): State<AppState>) -> Response {
    match state.lookup.submit(String::new()).await {
        Ok(lookup_state) => (StatusCode::OK, Json(lookup_state)).into_response(),
        Err(e) => controller_unavailable(e),
    }
}

async fn get_stats(State(state): State<AppState>) -> Response {
    match state.lookup.stats().await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => controller_unavailable(e),
    }
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.lookup.stats().await.ok();

    let (status_code, status) = if stats.is_some() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        stats,
    };

    (status_code, Json(response))
}

async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}

fn controller_unavailable(e: crate::error::LookupError) -> Response {
    error!("Lookup controller unavailable: {}", e);
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}
