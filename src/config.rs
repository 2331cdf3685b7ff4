//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Site registry source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Open-data portal base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Socrata dataset identifier for the monitoring sites table
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Maximum number of site records to request
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Optional Socrata application token (avoids throttling)
    #[serde(default)]
    pub app_token: Option<String>,

    #[serde(default = "default_source_timeout")]
    pub request_timeout_secs: u64,

    /// Local JSON snapshot of the sites table; when set the API is not called
    #[serde(default, deserialize_with = "optional_path")]
    pub sites_file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://www.data.act.gov.au".to_string()
}

fn default_dataset() -> String {
    "tsq4-63ge".to_string()
}

fn default_limit() -> u32 {
    100
}

fn default_source_timeout() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            dataset: default_dataset(),
            limit: default_limit(),
            app_token: None,
            request_timeout_secs: default_source_timeout(),
            sites_file: None,
        }
    }
}

/// Local data file configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// CSV of daily sensor readings
    #[serde(default = "default_readings_csv")]
    pub readings_csv: PathBuf,

    /// Text file holding the map-tile access token; `""` disables it
    #[serde(
        default = "default_mapbox_token_file",
        deserialize_with = "optional_path"
    )]
    pub mapbox_token_file: Option<PathBuf>,
}

fn default_readings_csv() -> PathBuf {
    PathBuf::from("2019_ACT_Daily_Rainfall_and_Streamflow.csv")
}

fn default_mapbox_token_file() -> Option<PathBuf> {
    Some(PathBuf::from("mapbox_token.txt"))
}

/// An empty path means "not configured"
fn non_empty_path(path: String) -> Option<PathBuf> {
    let path = path.trim();
    (!path.is_empty()).then(|| PathBuf::from(path))
}

fn optional_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(non_empty_path))
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            readings_csv: default_readings_csv(),
            mapbox_token_file: default_mapbox_token_file(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Page layout configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// "Code available" link shown under the heading; `""` hides it
    #[serde(default = "default_source_url", deserialize_with = "optional_text")]
    pub source_url: Option<String>,

    #[serde(default = "default_line_height")]
    pub line_graph_height: u32,

    #[serde(default = "default_map_height")]
    pub map_height: u32,

    /// Initial map zoom level
    #[serde(default = "default_map_zoom")]
    pub map_zoom: f64,
}

fn default_title() -> String {
    "ACT Government Water Monitoring Sites".to_string()
}

fn default_source_url() -> Option<String> {
    Some("https://github.com/JoeWalshe/act_water_app".to_string())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

fn default_line_height() -> u32 {
    400
}

fn default_map_height() -> u32 {
    800
}

fn default_map_zoom() -> f64 {
    8.0
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            source_url: default_source_url(),
            line_graph_height: default_line_height(),
            map_height: default_map_height(),
            map_zoom: default_map_zoom(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Whether structured JSON output was requested
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Default config file locations, in discovery order
    pub fn default_paths() -> Vec<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("act-water").join("config.toml"))
            .into_iter()
            .chain([
                PathBuf::from("/etc/act-water/config.toml"),
                PathBuf::from("./config.toml"),
            ])
            .collect()
    }

    /// First existing file among `paths`
    pub fn discover(paths: &[PathBuf]) -> Option<PathBuf> {
        paths.iter().find(|p| p.exists()).cloned()
    }

    /// Load the given file, or the first one found in the default
    /// locations, with environment overrides. Without a file the defaults
    /// plus environment apply. A file that exists but fails to load is an
    /// error, never skipped.
    ///
    /// Returns the file that was used, for logging once tracing is up.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(&Self::default_paths()),
        };
        let config = match &path {
            Some(path) => Self::load_with_env(path)?,
            None => Self::from_env(),
        };
        Ok((config, path))
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Source overrides
        if let Some(token) = var("ACT_WATER_SOCRATA_APP_TOKEN") {
            self.source.app_token = Some(token);
        }
        if let Some(path) = var("ACT_WATER_SITES_FILE") {
            self.source.sites_file = non_empty_path(path);
        }

        // Data overrides
        if let Some(path) = var("ACT_WATER_READINGS_CSV") {
            self.data.readings_csv = PathBuf::from(path);
        }
        if let Some(path) = var("ACT_WATER_MAPBOX_TOKEN_FILE") {
            self.data.mapbox_token_file = non_empty_path(path);
        }

        // API overrides
        if let Some(host) = var("ACT_WATER_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("ACT_WATER_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = var("ACT_WATER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("ACT_WATER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# ACT Water Dashboard Configuration
#
# Environment variables override these settings
# (an empty *_FILE variable disables that file):
# - ACT_WATER_HOST
# - ACT_WATER_PORT
# - ACT_WATER_READINGS_CSV
# - ACT_WATER_MAPBOX_TOKEN_FILE
# - ACT_WATER_SITES_FILE
# - ACT_WATER_SOCRATA_APP_TOKEN
# - ACT_WATER_LOG_LEVEL
# - ACT_WATER_LOG_FORMAT

[source]
# Open-data portal hosting the monitoring sites table
base_url = "https://www.data.act.gov.au"

# Socrata dataset id of the sites table
dataset = "tsq4-63ge"

# Maximum number of site records to fetch
limit = 100

# Optional application token, avoids throttling
# app_token = ""

# Request timeout in seconds
request_timeout_secs = 30

# Read sites from a local JSON snapshot instead of the portal
# sites_file = "sites.json"

[data]
# Daily rainfall and streamflow readings
readings_csv = "2019_ACT_Daily_Rainfall_and_Streamflow.csv"

# File containing the map-tile access token; set to "" to run without one
# (the map then uses the open-street-map style)
mapbox_token_file = "mapbox_token.txt"

[api]
host = "0.0.0.0"
port = 8050
request_timeout_secs = 30

[dashboard]
title = "ACT Government Water Monitoring Sites"
# "Code available" link under the heading; set to "" to hide it
source_url = "https://github.com/JoeWalshe/act_water_app"
line_graph_height = 400
map_height = 800
map_zoom = 8.0

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
