use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{ApiResponse, RegisterRequest};

/// Header carrying the agent identifier on token requests.
pub const AGENT_ID_HEADER: &str = "X-Agent-ID";

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(health))
        // Identity registration
        .route("/register", post(register))
        // Credential issuance
        .route("/token", post(token))
        .with_state(state)
}

// ============ Health Endpoints ============

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::success(state.health()))
}

// ============ Auth Endpoints ============

async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let confirmation = state.register(&req)?;
    Ok((StatusCode::CREATED, confirmation))
}

async fn token(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let agent_id = extract_agent_id(&headers)?;
    let resp = state.issue_token(agent_id)?;
    Ok(Json(resp))
}

fn extract_agent_id(headers: &HeaderMap) -> ApiResult<&str> {
    headers
        .get(AGENT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::Unauthorized)
}
