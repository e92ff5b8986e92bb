mod config;
mod error;
mod state;
mod telemetry;
pub mod routes {
    pub mod health;
    pub mod optimize;
    pub mod solve;
    pub mod validate;
}

use axum::{
    routing::{get, post},
    Router,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::AppConfig;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
        paths(
            routes::health::health,
            routes::solve::schedule,
            routes::validate::validate,
            routes::optimize::optimize,
        ),
        components(schemas(
            types::ScheduleRequest, types::ScheduleResponse,
            types::Class, types::ClassSubject, types::Subject, types::SubjectKind,
            types::Teacher, types::UnavailableSlot, types::FixedSlot, types::Day,
            types::ScheduleCell, types::Statistics,
            types::ValidateRequest, types::ValidateResponse, types::Conflict, types::ConflictKind,
            types::OptimizeRequest, types::OptimizeResponse,
            types::HealthResponse
        )),
        tags(
            (name = "sched-api", description = "Weekly school timetable scheduling API")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env();
    let addr_str = config.addr();
    let app_state = AppState::new(config);

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .route("/schedule", post(routes::solve::schedule))
        .route("/validate", post(routes::validate::validate))
        .route("/optimize", post(routes::optimize::optimize))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(telemetry::stack())
        .with_state(app_state);

    let addr: std::net::SocketAddr = addr_str.parse().expect("invalid listen addr");
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
