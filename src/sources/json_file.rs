use crate::sources::traits::ActivitySource;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Reads raw activity records from a JSON file on disk.
///
/// Accepts a single record object, an array of records, or an object keyed
/// by activity URL. Only object values are records. `null` marks a page the
/// extraction found nothing in; a string is either the
/// [`FAILED_SCRAPE`] marker or page text that was never structured, and is
/// skipped either way.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Split a parsed document into raw records
    pub fn records_from_document(document: Value) -> Result<Vec<Value>> {
        match document {
            Value::Array(items) => Ok(items
                .into_iter()
                .enumerate()
                .filter_map(|(i, item)| keep_record(&format!("[{}]", i), item))
                .collect()),
            Value::Object(map) if map.contains_key("id") => Ok(vec![Value::Object(map)]),
            Value::Object(map) => Ok(map
                .into_iter()
                .filter_map(|(url, item)| keep_record(&url, item))
                .collect()),
            other => bail!("expected a JSON array or object of activities, found {}", other),
        }
    }
}

/// Value the scrape step stores for a URL whose page could not be fetched
pub const FAILED_SCRAPE: &str = "Failed to scrape or empty body";

fn keep_record(key: &str, item: Value) -> Option<Value> {
    match item {
        Value::Null => {
            warn!("Skipping {}: no data was extracted", key);
            None
        }
        Value::String(text) if text == FAILED_SCRAPE => {
            warn!("Skipping {}: scrape failed", key);
            None
        }
        Value::String(text) => {
            warn!("Skipping {}: unstructured text ({} bytes)", key, text.len());
            None
        }
        record => Some(record),
    }
}

#[async_trait]
impl ActivitySource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<Value>> {
        info!("Reading activities from {}", self.path.display());

        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        debug!("Read {} bytes", text.len());

        let document: Value = serde_json::from_str(&text)
            .with_context(|| format!("{} is not valid JSON", self.path.display()))?;

        let records = Self::records_from_document(document)?;
        info!("Loaded {} raw records", records.len());
        Ok(records)
    }

    fn source_name(&self) -> &str {
        "json-file"
    }
}
