//! Core reading types
//!
//! - `Reading`: one dated sensor observation
//! - `VariableKind`: a measured quantity with its chart label and site prefix

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single timestamped sensor observation for one site and one variable
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    pub site_id: String,
    /// Site name as written in the file, when present
    #[serde(default)]
    pub site_name: Option<String>,
    /// Variable name as written in the file, e.g. "Rainfall"
    pub variable: String,
    /// Local (AEST) timestamp
    pub timestamp: NaiveDateTime,
    /// Observed value; `None` for an empty cell
    pub value: Option<f64>,
    pub unit: String,
}

impl Reading {
    pub fn new(
        site_id: impl Into<String>,
        variable: impl Into<String>,
        timestamp: NaiveDateTime,
        value: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            site_name: None,
            variable: variable.into(),
            timestamp,
            value: Some(value),
            unit: unit.into(),
        }
    }
}

/// A measured quantity shown in one dashboard panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableKind {
    /// Chart label, e.g. "Streamflow"
    pub label: &'static str,
    /// `VariableName` column value in the readings file
    pub variable: &'static str,
    /// Site type prefix of the sites that measure it
    pub site_prefix: &'static str,
}

impl VariableKind {
    pub const STREAMFLOW: VariableKind = VariableKind {
        label: "Streamflow",
        variable: "Stream Discharge Ml/Day",
        site_prefix: "410",
    };

    pub const RAINFALL: VariableKind = VariableKind {
        label: "Rainfall",
        variable: "Rainfall",
        site_prefix: "570",
    };
}
