// Read-only boundary to the normalized feed:
// no writes
// no merging
// ids must already be unique

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::record::Record;
use crate::types::identifiers::CatalogVersion;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Duplicate record ID: {0}")]
    DuplicateRecordId(String),
}

#[derive(Debug, Deserialize)]
struct FeedFile {
    #[serde(default)]
    fetched_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "dogs", alias = "animals")]
    records: Vec<Record>,
}

/// Records loaded from one normalized feed, in feed order.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Content hash of the raw feed bytes.
    pub version: CatalogVersion,
    pub fetched_at: Option<DateTime<Utc>>,
    pub records: Vec<Record>,
}

impl Catalog {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let feed: FeedFile = serde_json::from_slice(bytes)?;

        let mut seen = BTreeSet::new();
        for record in &feed.records {
            if !seen.insert(record.id.as_str()) {
                return Err(CatalogError::DuplicateRecordId(record.id.as_str().to_string()));
            }
        }

        let catalog = Catalog {
            version: CatalogVersion::from_content(bytes),
            fetched_at: feed.fetched_at,
            records: feed.records,
        };
        info!(
            records = catalog.records.len(),
            version = %catalog.version.as_str(),
            "catalog_loaded"
        );
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, CatalogError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_slice(&bytes)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let bytes = std::fs::read(path)?;
        Self::from_slice(&bytes)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
