use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::feed::CatalogError;
use crate::types::identifiers::RecordId;

/// Per-record view counts, as recorded by the view store. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewCounts {
    inner: BTreeMap<String, u64>,
}

impl ViewCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Views for `id`, zero when never seen.
    pub fn get(&self, id: &RecordId) -> u64 {
        self.inner.get(id.as_str()).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Load counts from `path`. A missing file means nothing has been viewed.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        match std::fs::read(path) {
            Ok(bytes) => Self::from_slice(&bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "views_file_missing");
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for ViewCounts {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
