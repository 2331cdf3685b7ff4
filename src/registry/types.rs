//! Site record types
//!
//! - `Site`: one monitoring location, normalized from a raw portal record
//! - `RawSiteRecord`: the untyped JSON object as the portal returns it

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::RegistryError;

/// Number of leading id characters that form the site type
pub const SITE_TYPE_PREFIX_LEN: usize = 3;

/// Raw record from the sites table. Socrata returns every column as a string,
/// but numbers are accepted too.
pub type RawSiteRecord = Map<String, Value>;

/// A monitored physical location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Site {
    /// Site identifier, e.g. "410001"
    pub id: String,
    /// Display name; empty when the portal has none
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
    /// Category derived from the id prefix ("410" streamflow, "570" rainfall)
    #[serde(rename = "type")]
    pub site_type: String,
}

impl Site {
    /// Create a site, deriving its type from the id
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let site_type = site_type_of(&id);
        Self {
            id,
            name: name.into(),
            latitude: None,
            longitude: None,
            elevation: None,
            site_type,
        }
    }

    /// Builder method: set coordinates
    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Both coordinates, if known
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Normalize a raw portal record.
    ///
    /// Numeric columns that are missing or fail to parse become `None`.
    /// A record without a `siteid` is malformed.
    pub fn from_record(index: usize, record: &RawSiteRecord) -> Result<Self, RegistryError> {
        let id = text_field(record, "siteid")
            .filter(|id| !id.is_empty())
            .ok_or(RegistryError::MissingField {
                index,
                field: "siteid",
            })?;

        let name = text_field(record, "sitename").unwrap_or_default();

        Ok(Self {
            site_type: site_type_of(&id),
            id,
            name,
            latitude: numeric_field(record, "latitude"),
            longitude: numeric_field(record, "longitude"),
            elevation: numeric_field(record, "elevation"),
        })
    }
}

/// Derive the site type: the first three characters of the id
pub fn site_type_of(id: &str) -> String {
    id.chars().take(SITE_TYPE_PREFIX_LEN).collect()
}

fn text_field(record: &RawSiteRecord, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn numeric_field(record: &RawSiteRecord, key: &str) -> Option<f64> {
    let value = match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}
