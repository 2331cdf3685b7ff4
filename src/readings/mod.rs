//! Sensor Reading Store
//!
//! The daily readings table, held entirely in memory:
//!
//! - **types**: `Reading` and `VariableKind`
//! - **csv_import**: CSV loader with header-based column lookup
//! - **error**: error types
//!
//! Rows keep file order. A per-variable index partitions them by
//! `VariableName` without copying.

pub mod csv_import;
pub mod error;
pub mod types;

pub use csv_import::{parse_timestamp, ReadingsImporter};
pub use error::{ReadingsError, ReadingsResult};
pub use types::{Reading, VariableKind};

use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Immutable table of sensor readings
#[derive(Debug, Clone, Default)]
pub struct ReadingStore {
    readings: Vec<Reading>,
    /// Row indices per variable name, in file order
    by_variable: HashMap<String, Vec<usize>>,
}

impl ReadingStore {
    pub fn new(readings: Vec<Reading>) -> Self {
        let mut by_variable: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, reading) in readings.iter().enumerate() {
            by_variable
                .entry(reading.variable.clone())
                .or_default()
                .push(idx);
        }
        Self {
            readings,
            by_variable,
        }
    }

    /// Load the whole readings file
    pub fn load(path: &Path) -> ReadingsResult<Self> {
        tracing::info!("Loading sensor readings from {:?}", path);
        let store = Self::new(ReadingsImporter::new().import(path)?);

        let stats = store.stats();
        tracing::info!(
            readings = stats.readings,
            sites = stats.sites,
            variables = stats.variables,
            "Loaded sensor readings"
        );
        Ok(store)
    }

    /// Rows for one variable, in file order
    pub fn for_variable<'a>(&'a self, variable: &str) -> impl Iterator<Item = &'a Reading> + 'a {
        self.by_variable
            .get(variable)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.readings[idx])
    }

    /// Rows for one variable restricted to a set of site ids, in file order
    pub fn filter<'a>(
        &'a self,
        variable: &str,
        site_ids: &'a HashSet<&'a str>,
    ) -> impl Iterator<Item = &'a Reading> + 'a {
        self.for_variable(variable)
            .filter(move |r| site_ids.contains(r.site_id.as_str()))
    }

    /// Distinct site ids that report a variable
    pub fn sites_for_variable(&self, variable: &str) -> HashSet<&str> {
        self.for_variable(variable)
            .map(|r| r.site_id.as_str())
            .collect()
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        let sites: HashSet<&str> = self.readings.iter().map(|r| r.site_id.as_str()).collect();
        StoreStats {
            readings: self.readings.len(),
            sites: sites.len(),
            variables: self.by_variable.len(),
        }
    }
}

/// Summary counts for logging and health checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub readings: usize,
    pub sites: usize,
    pub variables: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 1, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn store() -> ReadingStore {
        ReadingStore::new(vec![
            Reading::new("410001", "Stream Discharge Ml/Day", day(1), 10.0, "Ml/Day"),
            Reading::new("570946", "Rainfall", day(1), 0.4, "mm"),
            Reading::new("410002", "Stream Discharge Ml/Day", day(1), 3.0, "Ml/Day"),
            Reading::new("410001", "Stream Discharge Ml/Day", day(2), 11.0, "Ml/Day"),
        ])
    }

    #[test]
    fn test_for_variable_file_order() {
        let store = store();
        let values: Vec<Option<f64>> = store
            .for_variable("Stream Discharge Ml/Day")
            .map(|r| r.value)
            .collect();
        assert_eq!(values, vec![Some(10.0), Some(3.0), Some(11.0)]);
        assert_eq!(store.for_variable("Evaporation").count(), 0);
    }

    #[test]
    fn test_filter_by_sites() {
        let store = store();
        let ids: HashSet<&str> = ["410001"].into_iter().collect();
        let rows: Vec<&Reading> = store.filter("Stream Discharge Ml/Day", &ids).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.site_id == "410001"));
    }

    #[test]
    fn test_stats() {
        let store = store();
        assert_eq!(
            store.stats(),
            StoreStats {
                readings: 4,
                sites: 3,
                variables: 2
            }
        );
        assert_eq!(store.sites_for_variable("Rainfall").len(), 1);
    }
}
