use axum::{extract::State, http::StatusCode, Json};

use sched_core::{compute_statistics, prepare, SolveOutcome};
use types::{ScheduleRequest, ScheduleResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /schedule` — builds the model, runs the solver on a blocking
/// thread (a solve can occupy the full time budget, so it must never stall
/// the async runtime's worker threads), and projects the result into a
/// timetable.
#[utoipa::path(
    post,
    path = "/schedule",
    request_body = ScheduleRequest,
    responses(
        (status = 200, description = "Schedule produced", body = ScheduleResponse),
        (status = 400, description = "Bad input or infeasible instance", body = ScheduleResponse),
    )
)]
pub async fn schedule(
    State(state): State<AppState>,
    Json(req): Json<ScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleResponse>), ApiError> {
    let instance: types::ScheduleInstance = req.into();
    let config = state.config.solve;
    let idx = prepare(&instance, &config)?;

    let solver = state.solver.clone();
    let (outcome, instance, idx) = tokio::task::spawn_blocking(move || {
        let result = solver.solve(&instance, &idx, &config);
        (result, instance, idx)
    })
    .await
    .map_err(|e| sched_core::ScheduleError::Internal(anyhow::anyhow!(e)))?;

    let outcome = outcome?;

    match outcome {
        SolveOutcome::Optimal { cells, solve_time } | SolveOutcome::Feasible { cells, solve_time } => {
            let stats = compute_statistics(&instance, &idx, &cells, solve_time);
            Ok((
                StatusCode::OK,
                Json(ScheduleResponse::Success {
                    message: "schedule generated".to_string(),
                    timetable: cells,
                    statistics: stats,
                }),
            ))
        }
        SolveOutcome::Infeasible { solve_time } => {
            let stats = compute_statistics(&instance, &idx, &[], solve_time);
            Ok((
                StatusCode::BAD_REQUEST,
                Json(ScheduleResponse::Error {
                    message: "no feasible schedule within the time budget".to_string(),
                    statistics: Some(stats),
                }),
            ))
        }
    }
}
