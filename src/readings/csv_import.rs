//! CSV Import
//!
//! Loads the daily rainfall and streamflow export.
//! Columns are located by header name, so column order does not matter.

use chrono::{NaiveDate, NaiveDateTime};
use std::io::Read;
use std::path::Path;

use super::error::{ReadingsError, ReadingsResult};
use super::types::Reading;

/// Datetime formats tried in order. Slash dates are month-first; day-first
/// only matches once the leading field cannot be a month.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// `Value` cells read as a missing reading (case-sensitive)
const MISSING_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Readings CSV importer
#[derive(Debug, Default)]
pub struct ReadingsImporter;

/// Positions of the columns we read
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    site_id: usize,
    site_name: Option<usize>,
    variable: usize,
    value: usize,
    unit: usize,
    timestamp: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> ReadingsResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require =
            |name: &'static str| find(name).ok_or(ReadingsError::MissingColumn(name));

        Ok(Self {
            site_id: require("SiteID")?,
            site_name: find("sitename"),
            variable: require("VariableName")?,
            value: require("Value")?,
            unit: require("Unit")?,
            timestamp: require("DatetimeAEST")?,
        })
    }
}

impl ReadingsImporter {
    pub fn new() -> Self {
        Self
    }

    /// Import readings from a CSV file
    pub fn import(&self, path: &Path) -> ReadingsResult<Vec<Reading>> {
        let file = std::fs::File::open(path).map_err(|e| ReadingsError::Open {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        self.import_reader(file)
    }

    /// Import from a CSV string (useful for testing)
    pub fn import_str(&self, csv_data: &str) -> ReadingsResult<Vec<Reading>> {
        self.import_reader(csv_data.as_bytes())
    }

    fn import_reader<R: Read>(&self, source: R) -> ReadingsResult<Vec<Reading>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(source);

        let columns = ColumnMap::from_headers(reader.headers()?)?;

        let mut readings = Vec::new();
        for result in reader.records() {
            let record = result?;
            readings.push(parse_record(&record, &columns)?);
        }

        Ok(readings)
    }
}

fn parse_record(record: &csv::StringRecord, columns: &ColumnMap) -> ReadingsResult<Reading> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let field = |idx: usize, name: &'static str| {
        record
            .get(idx)
            .map(str::trim)
            .ok_or(ReadingsError::MissingField { line, field: name })
    };

    let site_id = field(columns.site_id, "SiteID")?;
    if site_id.is_empty() {
        return Err(ReadingsError::MissingField {
            line,
            field: "SiteID",
        });
    }

    let ts_str = field(columns.timestamp, "DatetimeAEST")?;
    let timestamp = parse_timestamp(ts_str).ok_or_else(|| ReadingsError::Timestamp {
        line,
        value: ts_str.to_string(),
    })?;

    let value_str = field(columns.value, "Value")?;
    let value = if MISSING_VALUES.contains(&value_str) {
        None
    } else {
        Some(value_str.parse::<f64>().map_err(|_| ReadingsError::Value {
            line,
            value: value_str.to_string(),
        })?)
    };

    let site_name = columns
        .site_name
        .and_then(|idx| record.get(idx))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(Reading {
        site_id: site_id.to_string(),
        site_name,
        variable: field(columns.variable, "VariableName")?.to_string(),
        timestamp,
        value,
        unit: field(columns.unit, "Unit")?.to_string(),
    })
}

/// Parse a timestamp cell. Date-only values land on midnight.
pub fn parse_timestamp(ts_str: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(ts_str, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(ts_str, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
