mod config;
mod employees;
mod errors;
mod models;
mod routes;
mod scorer_client;
mod scoring;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::scorer_client::HttpScorer;
use crate::scoring::weights::SkillWeights;
use crate::state::AppState;
use crate::store::employees::EmployeeStore;
use crate::store::jobs::JobStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentGrid API v{}", env!("CARGO_PKG_VERSION"));

    // Sheet-backed stores; the employee sheet is created on first write
    let employees = Arc::new(Mutex::new(EmployeeStore::new(&config.employee_sheet)));
    let jobs = Arc::new(JobStore::new(&config.job_sheet));
    info!("Employee sheet: {}", config.employee_sheet);
    info!("Job sheet: {}", config.job_sheet);

    // External ML scorer client
    let scorer = Arc::new(HttpScorer::new(config.scorer_url.clone()));
    info!("Scorer endpoint: {}", config.scorer_url);

    // Build app state
    let state = AppState {
        employees,
        jobs,
        scorer,
        weights: SkillWeights::default(),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
