//! Site Routes
//!
//! - GET /api/v1/sites - The monitoring sites loaded at startup

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::SitesResponse;
use crate::api::state::AppState;

/// GET /api/v1/sites
pub async fn list_sites(State(state): State<Arc<AppState>>) -> Response {
    let sites = state.context.sites().sites();
    Json(SitesResponse {
        count: sites.len(),
        sites,
    })
    .into_response()
}
