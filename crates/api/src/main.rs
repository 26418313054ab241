use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marketdesk_core::dashboard::{Dashboard, DashboardView};
use marketdesk_core::domain::Domain;

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = marketdesk_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let dashboard = Arc::new(Dashboard::from_settings(&settings)?);
    spawn_refresh_loop(Arc::clone(&dashboard));

    let state = AppState {
        dashboard,
        default_language: settings.default_language().to_string(),
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/:domain", get(get_domain))
        .route("/dashboard/:domain/refresh", post(refresh_domain))
        .route("/dashboard/:domain/analyze", post(analyze_domain))
        .route("/dashboard/:domain/reset", post(reset_domain))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "dashboard api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    dashboard: Arc<Dashboard>,
    default_language: String,
}

// The refresh timer is the only automatic re-fetch; individual fetches never
// retry on their own. First tick fires immediately to cover startup.
fn spawn_refresh_loop(dashboard: Arc<Dashboard>) {
    let secs = std::env::var("REFRESH_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS);

    tokio::spawn(async move {
        if secs == 0 {
            dashboard.refresh_all().await;
            tracing::info!("refresh loop disabled; performed startup refresh only");
            return;
        }

        let mut ticker = tokio::time::interval(Duration::from_secs(secs));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            dashboard.refresh_all().await;
            tracing::debug!(interval_secs = secs, "scheduled dashboard refresh complete");
        }
    });
}

async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.dashboard.view().await)
}

async fn get_domain(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let domain: Domain = domain.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
    domain_view(&state, domain).await
}

async fn refresh_domain(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let domain: Domain = domain.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
    state.dashboard.refresh_domain(domain).await;
    domain_view(&state, domain).await
}

#[derive(Debug, Deserialize)]
struct AnalyzeParams {
    language: Option<String>,
}

async fn analyze_domain(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let domain: Domain = domain.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
    let language = params
        .language
        .unwrap_or_else(|| state.default_language.clone());

    state.dashboard.analyze_domain(domain, &language).await;
    domain_view(&state, domain).await
}

async fn reset_domain(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let domain: Domain = domain.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
    state.dashboard.reset_domain(domain).await;
    domain_view(&state, domain).await
}

async fn domain_view(
    state: &AppState,
    domain: Domain,
) -> Result<Json<serde_json::Value>, StatusCode> {
    state
        .dashboard
        .view_domain(domain)
        .await
        .map(Json)
        .map_err(|e| {
            sentry_anyhow::capture_anyhow(&e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &marketdesk_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
