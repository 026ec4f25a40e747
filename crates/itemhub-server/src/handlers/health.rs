//! Liveness check

use axum::Json;
use itemhub_types::HealthStatus;

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}
