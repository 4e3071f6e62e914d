use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use dashboard::DashboardContext;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;
mod page;

use api::build_router;
use app_state::AppState;
use config::{load_settings, normalize_database_url};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings();
    let database_url = normalize_database_url(&settings.database_url);
    let rows = storage::load_snapshot(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            error = %format!("{error:#}"),
            "failed to load experiment logs; the dashboard cannot start without its dataset"
        );
        error
    })?;

    let dashboard = DashboardContext::from_rows(rows, settings.currency_symbol)
        .context("experiment log snapshot failed validation")?;
    info!(
        rows = dashboard.table().len(),
        researchers = dashboard.options().researchers.len(),
        chemicals = dashboard.options().chemicals.len(),
        instruments = dashboard.options().instruments.len(),
        "dataset ready"
    );

    let app = build_router(Arc::new(AppState { dashboard }));

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.bind_addr))?;
    info!(%addr, "dashboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
