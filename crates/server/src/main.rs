use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use session::{Decision, SessionViewController, StaticCredentialVerifier};
use shared::{
    domain::{ClickCounters, Credentials, TriggerEvent},
    error::{ApiError, ErrorCode},
    protocol::{DashboardData, EventRequest, ViewResponse},
};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod dashboard;
mod page;

use app_state::{local_today, AppState};
use config::{load_settings, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(about = "Energy usage dashboard behind a login gate")]
struct Cli {
    /// Settings file; missing files fall back to defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Overrides the bind address from the settings file and environment.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config);
    if let Some(bind) = cli.bind {
        settings.server_bind = bind;
    }

    let verifier = StaticCredentialVerifier::new(
        settings.admin_username.clone(),
        settings.admin_password.clone(),
    );
    let state = AppState {
        controller: SessionViewController::new(verifier),
        assets_dir: settings.assets_dir.clone(),
        body_limit_bytes: settings.body_limit_bytes,
        today: local_today,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, assets_dir = %settings.assets_dir.display(), "dashboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/events", post(handle_event))
        .route("/api/dashboard", get(dashboard_data))
        .nest_service("/assets", ServeDir::new(&state.assets_dir))
        .layer(RequestBodyLimitLayer::new(state.body_limit_bytes))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let view = state
        .controller
        .evaluate(None, ClickCounters::default(), &Credentials::empty());
    let data = dashboard::sample_dashboard((state.today)());
    Html(page::render_page(view, &data))
}

async fn dashboard_data(State(state): State<Arc<AppState>>) -> Json<DashboardData> {
    Json(dashboard::sample_dashboard((state.today)()))
}

async fn handle_event(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<Json<ViewResponse>, (StatusCode, Json<ApiError>)> {
    let Json(req) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected malformed event body");
        (
            rejection.status(),
            Json(ApiError::new(ErrorCode::Validation, rejection.body_text())),
        )
    })?;
    let trigger = req
        .trigger
        .as_deref()
        .map(str::parse::<TriggerEvent>)
        .transpose()
        .map_err(|e| {
            warn!(control = %e.0, "rejected event from unknown control");
            (StatusCode::BAD_REQUEST, Json(ApiError::from(e)))
        })?;

    let credentials = req.credentials();
    let outcome = state.controller.respond(trigger, req.counters(), &credentials);
    let username = credentials.username.as_deref().unwrap_or_default();
    match outcome.decision {
        Decision::LoginAccepted => info!(%username, "login accepted"),
        Decision::LoginRejected => warn!(%username, "login rejected"),
        Decision::LoggedOut => info!("logged out"),
        Decision::Idle => {}
    }

    Ok(Json(ViewResponse::new(outcome.view, outcome.message)))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
