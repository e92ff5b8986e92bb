use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use sched_core::ScheduleError;
use types::ScheduleResponse;

/// Maps the core's typed errors onto the HTTP boundary: malformed input is a
/// 400, an unexpected internal failure is a 500 with no stack leakage. Solver
/// infeasibility never reaches this type — it is returned as a successful
/// HTTP response carrying an error-shaped body (see `routes::solve`).
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<ScheduleError> for ApiError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::BadInput { which, why } => ApiError {
                status: StatusCode::BAD_REQUEST,
                message: format!("{which}: {why}"),
            },
            ScheduleError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "internal error".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ScheduleResponse::Error {
            message: self.message,
            statistics: None,
        };
        (self.status, Json(body)).into_response()
    }
}
