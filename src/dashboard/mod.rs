//! Dashboard
//!
//! Everything between the loaded tables and the page:
//!
//! - **panel**: the two chart panels and their variables
//! - **selection**: typed dropdown selection
//! - **options**: dropdown entries per panel
//! - **chart**: selection → line chart
//! - **map**: the site map
//! - **figure**: plotly figure types
//! - **shell**: page state and its transitions
//!
//! # Flow
//!
//! ```text
//! startup:   SiteRegistry ─→ options, map
//! change:    dropdown value ─→ Selection ─→ chart::render ─→ ChartSpec
//! ```

pub mod chart;
pub mod figure;
pub mod map;
pub mod options;
pub mod panel;
pub mod selection;
pub mod shell;

pub use chart::render;
pub use figure::ChartSpec;
pub use options::{build_options, DropdownOption};
pub use panel::{PanelKind, UnknownPanel};
pub use selection::Selection;
pub use shell::{DashboardShell, DashboardSnapshot, PanelState, PanelView};
