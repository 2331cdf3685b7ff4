//! Panel Routes
//!
//! Dropdown options and chart rendering for the two chart panels.
//!
//! - GET /api/v1/panels/:panel/options - Dropdown entries
//! - GET /api/v1/panels/:panel/chart?sites=a,b - Render a chart
//! - POST /api/v1/panels/:panel/selection - Apply a dropdown change

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ChartQuery, OptionsResponse, SelectionRequest};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::{DashboardShell, PanelKind};

/// GET /api/v1/panels/:panel/options
pub async fn list_options(
    State(state): State<Arc<AppState>>,
    Path(panel): Path<String>,
) -> ApiResult<Response> {
    let panel: PanelKind = panel.parse()?;
    Ok(Json(OptionsResponse {
        panel,
        options: state.context.options(panel),
    })
    .into_response())
}

/// GET /api/v1/panels/:panel/chart
///
/// Missing or empty `sites` renders the blank chart.
pub async fn render_chart(
    State(state): State<Arc<AppState>>,
    Path(panel): Path<String>,
    Query(query): Query<ChartQuery>,
) -> ApiResult<Response> {
    let panel: PanelKind = panel.parse()?;
    let chart = state.context.render(panel, &query.selection());
    Ok(Json(chart).into_response())
}

/// POST /api/v1/panels/:panel/selection
///
/// Normalizes the raw dropdown value and returns the panel's new state.
/// A value made only of blank ids is a 400.
pub async fn update_selection(
    State(state): State<Arc<AppState>>,
    Path(panel): Path<String>,
    Json(req): Json<SelectionRequest>,
) -> ApiResult<Response> {
    let panel: PanelKind = panel.parse()?;
    let selection = req.into_selection()?;

    tracing::debug!(panel = %panel, sites = %selection.joined(), "Selection changed");

    let new_state = DashboardShell::transition(&state.context, panel, selection);
    Ok(Json(new_state).into_response())
}
