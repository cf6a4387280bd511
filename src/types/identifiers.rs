use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::scoring::ScoringProfile;
use crate::selection::RankConfig;

/// Stable, caller-assigned record identifier (e.g. `"nycacc:12345"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId(value)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn sha256_prefixed(hasher: Sha256) -> String {
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Content hash of a loaded catalog feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogVersion(String);

impl CatalogVersion {
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        CatalogVersion(sha256_prefixed(hasher))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fingerprint of the tuning that produced a ranking.
///
/// Hashes the JSON form of the rank config followed by the scoring profile,
/// so two rankings with the same version were produced under identical rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigVersion(String);

impl ConfigVersion {
    pub fn from_config(
        config: &RankConfig,
        profile: &ScoringProfile,
    ) -> Result<Self, serde_json::Error> {
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_vec(config)?);
        hasher.update(serde_json::to_vec(profile)?);
        Ok(ConfigVersion(sha256_prefixed(hasher)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
