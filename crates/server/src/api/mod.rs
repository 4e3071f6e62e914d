use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use dashboard::recompute;
use shared::{
    domain::FilterSelection,
    error::ApiError,
    protocol::{DashboardRequest, DashboardUpdate, FilterOptions},
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::warn;

use crate::{app_state::AppState, page::INDEX_HTML};

pub(crate) const MAX_REQUEST_BYTES: usize = 64 * 1024;

pub(crate) fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/filters", get(filter_options))
        .route("/api/dashboard", post(update_dashboard))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn filter_options(State(state): State<Arc<AppState>>) -> Json<FilterOptions> {
    Json(state.dashboard.options().clone())
}

async fn update_dashboard(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DashboardRequest>, JsonRejection>,
) -> Result<Json<DashboardUpdate>, (StatusCode, Json<ApiError>)> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(status = %rejection.status(), error = %rejection.body_text(), "rejected filter request");
        (
            rejection.status(),
            Json(ApiError::validation(rejection.body_text())),
        )
    })?;

    let selection = FilterSelection::from(request);
    Ok(Json(recompute(&state.dashboard, &selection)))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
