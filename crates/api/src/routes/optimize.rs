use axum::Json;

use types::{Day, OptimizeRequest, OptimizeResponse};

/// `POST /optimize` — sorts the input timetable by (day, period) and returns
/// it. Exists for API completeness; does no solver work.
#[utoipa::path(
    post,
    path = "/optimize",
    request_body = OptimizeRequest,
    responses((status = 200, description = "Sorted timetable", body = OptimizeResponse))
)]
pub async fn optimize(Json(req): Json<OptimizeRequest>) -> Json<OptimizeResponse> {
    let mut cells = req.timetable;
    cells.sort_by_key(|c| (day_index(c.day), c.period));
    Json(OptimizeResponse {
        optimized: cells,
        message: "timetable sorted by day and period".to_string(),
    })
}

fn day_index(day: Day) -> usize {
    day.index()
}
