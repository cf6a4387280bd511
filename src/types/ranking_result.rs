use serde::{Deserialize, Serialize};

use crate::preference::{Preference, PreferenceError};
use crate::record::{DesiredFilters, Record};

/// What a ranking call is asked to match against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankQuery {
    #[serde(default)]
    pub preferences: Vec<Preference>,
    #[serde(default)]
    pub desired: DesiredFilters,
}

impl RankQuery {
    pub fn new(preferences: Vec<Preference>, desired: DesiredFilters) -> Self {
        Self {
            preferences,
            desired,
        }
    }

    pub fn validate(&self) -> Result<(), PreferenceError> {
        self.preferences.iter().try_for_each(Preference::validate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Base,
    Match,
    Negative,
    Neutral,
    Drop,
    Explore,
}

/// One human-readable line explaining part of a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    pub field: String,
    pub effect: Effect,
    pub message: String,
}

impl Reason {
    pub fn new(field: impl Into<String>, effect: Effect, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            effect,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Best,
    Explore,
}

/// A ranked record in the output, fully self-contained and serializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub id: String,
    pub source_id: String,
    pub section: Section,

    pub base_score: f64,
    pub pref_score: f64,
    pub core_score: f64,
    pub exploration_bonus: f64,
    pub final_score: f64,
    pub completeness: f64,

    pub reasons: Vec<Reason>,
    pub record: Record,
}

/// Counters describing how the ranked list was assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingMetadata {
    pub config_version: String,
    pub top_n: usize,

    pub records_considered: usize,
    pub records_dropped: usize,
    pub records_capped: usize,

    pub best_selected: usize,
    pub explore_selected: usize,
    pub explore_from_fallback: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    pub candidates: Vec<ScoredCandidate>,
    pub ranking: RankingMetadata,
}

impl RankingResult {
    pub fn section(&self, section: Section) -> impl Iterator<Item = &ScoredCandidate> {
        self.candidates.iter().filter(move |c| c.section == section)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.id.as_str()).collect()
    }
}

/// Internal: a record that survived preference evaluation, scored but not
/// yet placed. Borrows the record so nothing is cloned until output.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub record: &'a Record,

    pub base_score: f64,
    pub pref_score: f64,
    pub core_score: f64,
    pub exploration_bonus: f64,
    pub final_score: f64,
    pub completeness: f64,

    pub reasons: Vec<Reason>,
}

impl<'a> Candidate<'a> {
    pub fn into_output(self, section: Section) -> ScoredCandidate {
        ScoredCandidate {
            id: self.record.id.as_str().to_string(),
            source_id: self.record.source_id().into_owned(),
            section,
            base_score: self.base_score,
            pref_score: self.pref_score,
            core_score: self.core_score,
            exploration_bonus: self.exploration_bonus,
            final_score: self.final_score,
            completeness: self.completeness,
            reasons: self.reasons,
            record: self.record.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RankError {
    #[error("Invalid exploration k: {0} (must be finite and >= 0)")]
    InvalidExplorationK(f64),

    #[error("Invalid minimum completeness: {0} (must be within [0, 1])")]
    InvalidMinCompleteness(f64),

    #[error("Invalid minimum core score: {0} (must be finite)")]
    InvalidMinCoreScore(f64),

    #[error("Invalid preference: {0}")]
    InvalidPreference(#[from] PreferenceError),

    #[error("Config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
