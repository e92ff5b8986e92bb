use axum::Json;

use sched_core::find_conflicts;
use types::{ValidateRequest, ValidateResponse};

/// `POST /validate` — scans an externally supplied timetable for teacher and
/// class double-bookings. Never invokes the solver.
#[utoipa::path(
    post,
    path = "/validate",
    request_body = ValidateRequest,
    responses((status = 200, description = "Conflict report", body = ValidateResponse))
)]
pub async fn validate(Json(req): Json<ValidateRequest>) -> Json<ValidateResponse> {
    let conflicts = find_conflicts(&req.timetable);
    let valid = conflicts.is_empty();
    let message = if valid {
        "no conflicts found".to_string()
    } else {
        format!("{} conflict(s) found", conflicts.len())
    };
    Json(ValidateResponse {
        valid,
        conflicts,
        message,
    })
}
