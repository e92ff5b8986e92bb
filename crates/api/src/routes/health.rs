use axum::Json;

use types::HealthResponse;

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "sched-api".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
