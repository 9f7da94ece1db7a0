/// Liveness endpoints
///
/// # Endpoints
///
/// ```text
/// GET /ping     → 200 { "message": "Pong!" }
/// GET /health   → 200 { "status": "healthy", "version": "0.1.0", "database": "connected" }
/// ```

use crate::{app::AppState, error::ApiResult, routes::MessageResponse};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tasklink_shared::db::pool;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,
}

/// Constant liveness check; never touches the database
pub async fn ping() -> Json<MessageResponse<()>> {
    Json(MessageResponse::message("Pong!"))
}

/// Health check handler
///
/// Reports `degraded` rather than failing when the database check fails, so
/// the endpoint itself stays a liveness signal.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_status = match pool::health_check(&state.db).await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            "disconnected"
        }
    };

    Ok(Json(HealthResponse {
        status: if database_status == "connected" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database_status.to_string(),
    }))
}
