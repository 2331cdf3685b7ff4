//! # ACT Water
//!
//! Interactive dashboard for ACT Government water-monitoring sites: a map of
//! site locations and streamflow/rainfall time-series charts.
//!
//! ## Modules
//!
//! - [`registry`]: monitoring sites fetched from the open-data portal
//! - [`readings`]: daily sensor readings loaded from CSV
//! - [`dashboard`]: dropdown options, chart rendering, site map, page state
//! - [`context`]: the immutable bundle built at startup
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use act_water::dashboard::{PanelKind, Selection};
//! use act_water::{Config, DashboardContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (config, _) = Config::resolve(None)?;
//!     let context = DashboardContext::load(&config).await?;
//!
//!     let chart = context.render(PanelKind::Streamflow, &Selection::single("410001"));
//!     println!("{}", chart.layout.title.text);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod readings;
pub mod registry;

pub use api::{build_router, serve, ApiError, AppState};
pub use config::{generate_default_config, Config, ConfigError, LoggingConfig};
pub use context::{DashboardContext, StartupError};
pub use dashboard::{ChartSpec, DashboardShell, DropdownOption, PanelKind, Selection};
pub use readings::{Reading, ReadingStore, ReadingsError, VariableKind};
pub use registry::{Site, SiteRegistry, SiteSource, SourceError};
