//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use tally_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
///
/// Redis is only probed when the search queue is backed by it.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();

    let db_healthy = ctx.pool().acquire().await.is_ok();

    let redis_healthy = match ctx.redis_pool() {
        Some(pool) => Some(pool.health_check().await.is_ok()),
        None => None,
    };

    let response = ReadinessResponse::ready(db_healthy, redis_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
