//! Chart panels
//!
//! The page has exactly two dropdown+chart panels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::readings::VariableKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Streamflow,
    Rainfall,
}

impl PanelKind {
    /// Panels in page order
    pub const ALL: [PanelKind; 2] = [PanelKind::Streamflow, PanelKind::Rainfall];

    pub fn variable(self) -> VariableKind {
        match self {
            PanelKind::Streamflow => VariableKind::STREAMFLOW,
            PanelKind::Rainfall => VariableKind::RAINFALL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PanelKind::Streamflow => "streamflow",
            PanelKind::Rainfall => "rainfall",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown panel: {0}")]
pub struct UnknownPanel(pub String);

impl FromStr for PanelKind {
    type Err = UnknownPanel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "streamflow" => Ok(PanelKind::Streamflow),
            "rainfall" => Ok(PanelKind::Rainfall),
            _ => Err(UnknownPanel(s.to_string())),
        }
    }
}
