//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::dashboard::{DropdownOption, PanelKind, Selection};
use crate::registry::Site;

// ============================================
// SELECTION DTOs
// ============================================

/// Raw dropdown value as the browser sends it.
///
/// A multi-select emits a list, but a single remaining choice may arrive
/// as a bare string and a cleared dropdown as `null`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SelectionInput {
    One(String),
    Many(Vec<String>),
}

impl SelectionInput {
    /// Whether the raw value names at least one id, blank or not
    fn has_entries(&self) -> bool {
        match self {
            SelectionInput::One(_) => true,
            SelectionInput::Many(ids) => !ids.is_empty(),
        }
    }
}

impl From<SelectionInput> for Selection {
    fn from(input: SelectionInput) -> Self {
        match input {
            SelectionInput::One(id) => Selection::single(id),
            SelectionInput::Many(ids) => Selection::new(ids),
        }
    }
}

/// Selection change request
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    #[serde(default)]
    pub value: Option<SelectionInput>,
}

impl SelectionRequest {
    /// `null`, a missing value and `[]` clear the panel. A value whose ids
    /// are all blank is rejected.
    pub fn into_selection(self) -> ApiResult<Selection> {
        let Some(input) = self.value else {
            return Ok(Selection::empty());
        };
        let has_entries = input.has_entries();
        let selection = Selection::from(input);
        if has_entries && selection.is_empty() {
            return Err(ApiError::Validation(
                "selection contains only blank site ids".to_string(),
            ));
        }
        Ok(selection)
    }
}

/// Query string for the chart endpoint
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    /// Comma-separated site ids
    #[serde(default)]
    pub sites: Option<String>,
}

impl ChartQuery {
    pub fn selection(&self) -> Selection {
        self.sites
            .as_deref()
            .map(Selection::parse_list)
            .unwrap_or_default()
    }
}

// ============================================
// REGISTRY DTOs
// ============================================

/// Site listing response
#[derive(Debug, Serialize)]
pub struct SitesResponse<'a> {
    pub count: usize,
    pub sites: &'a [Site],
}

/// Dropdown options response
#[derive(Debug, Serialize)]
pub struct OptionsResponse<'a> {
    pub panel: PanelKind,
    pub options: &'a [DropdownOption],
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    pub sites: usize,
    pub readings: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
