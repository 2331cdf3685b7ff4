//! Site Registry
//!
//! Loads the monitoring sites table once at startup:
//!
//! - **types**: `Site` and raw record normalization
//! - **source**: where records come from (open-data portal or snapshot file)
//! - **error**: error types
//!
//! The registry keeps source order; dropdowns are built from it unsorted.

pub mod error;
pub mod source;
pub mod types;

pub use error::{RegistryError, SourceError};
pub use source::{FileSource, SiteSource, SocrataSource};
pub use types::{site_type_of, RawSiteRecord, Site};

use std::collections::HashMap;

/// Immutable table of monitoring sites
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: Vec<Site>,
    by_id: HashMap<String, usize>,
}

impl SiteRegistry {
    /// Build a registry from already-normalized sites.
    /// A repeated id keeps its first position for lookups.
    pub fn new(sites: Vec<Site>) -> Self {
        let mut by_id = HashMap::with_capacity(sites.len());
        for (idx, site) in sites.iter().enumerate() {
            by_id.entry(site.id.clone()).or_insert(idx);
        }
        Self { sites, by_id }
    }

    /// Normalize raw portal records
    pub fn from_records(records: &[RawSiteRecord]) -> Result<Self, RegistryError> {
        let sites = records
            .iter()
            .enumerate()
            .map(|(idx, record)| Site::from_record(idx, record))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(sites))
    }

    /// Fetch and normalize the sites table from a source
    pub async fn load(source: &dyn SiteSource) -> Result<Self, crate::StartupError> {
        tracing::info!("Fetching monitoring sites from {}", source.describe());
        let records = source.fetch().await?;
        let registry = Self::from_records(&records)?;
        tracing::info!("Loaded {} monitoring sites", registry.len());
        Ok(registry)
    }

    pub fn get(&self, id: &str) -> Option<&Site> {
        self.by_id.get(id).map(|&idx| &self.sites[idx])
    }

    /// Sites in source order
    pub fn iter(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter()
    }

    /// Sites of one type, in source order
    pub fn of_type<'a>(&'a self, site_type: &'a str) -> impl Iterator<Item = &'a Site> + 'a {
        self.sites.iter().filter(move |s| s.site_type == site_type)
    }

    /// Distinct site types in order of first appearance
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        for site in &self.sites {
            if !types.contains(&site.site_type.as_str()) {
                types.push(&site.site_type);
            }
        }
        types
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
