//! Dashboard Context
//!
//! Everything loaded at startup, bundled into one immutable value.
//! Built once in `main`, then shared behind an `Arc` with every handler.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{Config, ConfigError, DashboardConfig};
use crate::dashboard::{
    build_options, chart, map, ChartSpec, DropdownOption, PanelKind, Selection,
};
use crate::readings::{ReadingStore, ReadingsError};
use crate::registry::{source, RegistryError, SiteRegistry, SourceError};

/// Fatal errors while building the context
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Site source error: {0}")]
    Source(#[from] SourceError),

    #[error("Site registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Readings error: {0}")]
    Readings(#[from] ReadingsError),

    #[error("Failed to read map token {path:?}: {error}")]
    Token { path: PathBuf, error: String },
}

pub struct DashboardContext {
    sites: SiteRegistry,
    readings: ReadingStore,
    options: HashMap<PanelKind, Vec<DropdownOption>>,
    site_map: ChartSpec,
    settings: DashboardConfig,
}

impl DashboardContext {
    /// Assemble a context from already-loaded tables
    pub fn new(
        sites: SiteRegistry,
        readings: ReadingStore,
        access_token: Option<&str>,
        settings: DashboardConfig,
    ) -> Self {
        let options: HashMap<PanelKind, Vec<DropdownOption>> = PanelKind::ALL
            .iter()
            .map(|&panel| (panel, build_options(&sites, &panel.variable())))
            .collect();

        for (panel, opts) in &options {
            let reporting = readings.sites_for_variable(panel.variable().variable);
            let silent = opts
                .iter()
                .filter(|o| !reporting.contains(o.value.as_str()))
                .count();
            tracing::debug!(
                panel = %panel,
                options = opts.len(),
                without_readings = silent,
                "Built dropdown options"
            );
        }

        let site_map = map::site_map(
            &sites,
            &map::MapOptions {
                access_token,
                height: settings.map_height,
                zoom: settings.map_zoom,
            },
        );

        Self {
            sites,
            readings,
            options,
            site_map,
            settings,
        }
    }

    /// Load every startup input named by the configuration.
    /// Any failure aborts startup; nothing is retried.
    pub async fn load(config: &Config) -> Result<Self, StartupError> {
        let source = source::from_config(&config.source)?;
        let sites = SiteRegistry::load(source.as_ref()).await?;

        let readings = ReadingStore::load(&config.data.readings_csv)?;

        let token = match &config.data.mapbox_token_file {
            Some(path) => Some(read_token(path)?),
            None => {
                tracing::info!("No map token configured, using open-street-map tiles");
                None
            }
        };

        Ok(Self::new(
            sites,
            readings,
            token.as_deref(),
            config.dashboard.clone(),
        ))
    }

    /// Render one panel's chart for a selection
    pub fn render(&self, panel: PanelKind, selection: &Selection) -> ChartSpec {
        chart::render(
            &self.readings,
            selection,
            &panel.variable(),
            self.settings.line_graph_height,
        )
    }

    pub fn options(&self, panel: PanelKind) -> &[DropdownOption] {
        self.options.get(&panel).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First dropdown option, or nothing when the panel has no sites
    pub fn initial_selection(&self, panel: PanelKind) -> Selection {
        self.options(panel)
            .first()
            .map(|o| Selection::single(&o.value))
            .unwrap_or_default()
    }

    pub fn sites(&self) -> &SiteRegistry {
        &self.sites
    }

    pub fn readings(&self) -> &ReadingStore {
        &self.readings
    }

    pub fn site_map(&self) -> &ChartSpec {
        &self.site_map
    }

    pub fn settings(&self) -> &DashboardConfig {
        &self.settings
    }
}

/// Read the map-tile access token, trimming surrounding whitespace
pub fn read_token(path: &Path) -> Result<String, StartupError> {
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| StartupError::Token {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
}
