//! Site Sources
//!
//! Where the raw sites table comes from:
//! - `SocrataSource`: one GET against the open-data portal's resource API
//! - `FileSource`: a local JSON snapshot with the same shape

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

use super::error::SourceError;
use super::types::RawSiteRecord;
use crate::config::SourceConfig;

/// Common trait for anything that can produce the raw sites table
#[async_trait]
pub trait SiteSource: Send + Sync {
    /// Human-readable description for logs
    fn describe(&self) -> String;

    /// Fetch the raw records, in source order
    async fn fetch(&self) -> Result<Vec<RawSiteRecord>, SourceError>;
}

/// Build the source selected by configuration
pub fn from_config(config: &SourceConfig) -> Result<Box<dyn SiteSource>, SourceError> {
    match &config.sites_file {
        Some(path) => Ok(Box::new(FileSource::new(path.clone()))),
        None => Ok(Box::new(SocrataSource::new(config)?)),
    }
}

/// Unauthenticated (or app-token) client for a Socrata dataset
pub struct SocrataSource {
    client: Client,
    base_url: String,
    dataset: String,
    limit: u32,
    app_token: Option<String>,
}

impl SocrataSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            dataset: config.dataset.clone(),
            limit: config.limit,
            app_token: config.app_token.clone(),
        })
    }

    /// Resource endpoint for the dataset
    pub fn resource_url(&self) -> String {
        format!("{}/resource/{}.json", self.base_url, self.dataset)
    }
}

#[async_trait]
impl SiteSource for SocrataSource {
    fn describe(&self) -> String {
        format!("{} (limit {})", self.resource_url(), self.limit)
    }

    async fn fetch(&self) -> Result<Vec<RawSiteRecord>, SourceError> {
        let mut request = self
            .client
            .get(self.resource_url())
            .query(&[("$limit", self.limit.to_string())]);

        if let Some(token) = &self.app_token {
            request = request.header("X-App-Token", token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout
            } else {
                SourceError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        into_records(body)
    }
}

/// Reads the sites table from a JSON file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SiteSource for FileSource {
    fn describe(&self) -> String {
        format!("{}", self.path.display())
    }

    async fn fetch(&self) -> Result<Vec<RawSiteRecord>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Io {
                path: self.path.clone(),
                error: e.to_string(),
            })?;

        let body: Value =
            serde_json::from_str(&content).map_err(|e| SourceError::Malformed(e.to_string()))?;

        into_records(body)
    }
}

fn into_records(body: Value) -> Result<Vec<RawSiteRecord>, SourceError> {
    let Value::Array(items) = body else {
        return Err(SourceError::Malformed("expected a JSON array".to_string()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(SourceError::Malformed(format!(
                "record {} is not an object: {}",
                i, other
            ))),
        })
        .collect()
}
