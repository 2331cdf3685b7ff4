//! Dashboard Routes
//!
//! The page itself and the data for its first paint.
//!
//! - GET / - Single-page HTML shell
//! - GET /api/v1/dashboard - Initial snapshot (map, options, charts)
//! - GET /api/v1/map - Site map figure

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::dashboard::DashboardShell;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/v1/dashboard
///
/// Every panel on its first dropdown option.
pub async fn snapshot(State(state): State<Arc<AppState>>) -> Response {
    let shell = DashboardShell::new(&state.context);
    Json(shell.snapshot()).into_response()
}

/// GET /api/v1/map
pub async fn site_map(State(state): State<Arc<AppState>>) -> Response {
    Json(state.context.site_map()).into_response()
}
