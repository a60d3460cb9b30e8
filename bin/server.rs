// Statement Visualizer - Web Server
// JSON API over the dashboard views

use anyhow::{Context, Result};
use statement_visualizer::api::{build_router, AppState};
use statement_visualizer::{load_from_env, load_statements, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = load_from_env()?;
    telemetry::init(&settings.log_filter)?;

    let statements = load_statements(&settings).context("Loading statements for server")?;
    tracing::info!(periods = statements.cash_flow.len(), "statements loaded");

    let app = build_router(AppState::new(statements, settings.thresholds));

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("Binding {}", settings.bind_addr))?;

    tracing::info!(addr = %settings.bind_addr, "server listening");
    tracing::info!("endpoints: /api/health /api/overview /api/balance /api/income /api/cashflow /api/report /api/format /api/validate");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
