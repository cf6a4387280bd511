use serde::{Deserialize, Serialize};

use crate::types::ranking_result::RankError;

pub const DEFAULT_TOP_N: usize = 14;
pub const DEFAULT_EXPLORATION_SLOTS: usize = 6;
pub const DEFAULT_EXPLORATION_K: f64 = 0.1;
pub const DEFAULT_MIN_CORE_SCORE: f64 = 0.0;
pub const DEFAULT_MIN_COMPLETENESS: f64 = 0.0;

/// Tuning knobs for one ranking call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Maximum number of results.
    pub top_n: usize,
    /// Per-source limit on the best section. `None` or `Some(0)` disables it.
    pub source_cap: Option<usize>,
    /// Slots reserved for discovery. Zero disables the explore section.
    pub exploration_slots: usize,
    pub exploration_k: f64,
    /// Gates for the primary explore pool. Fallback ignores them.
    pub min_core_score: f64,
    pub min_completeness: f64,
    pub tag_explore_reason: bool,
}

impl RankConfig {
    pub fn v0() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            source_cap: None,
            exploration_slots: DEFAULT_EXPLORATION_SLOTS,
            exploration_k: DEFAULT_EXPLORATION_K,
            min_core_score: DEFAULT_MIN_CORE_SCORE,
            min_completeness: DEFAULT_MIN_COMPLETENESS,
            tag_explore_reason: true,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_source_cap(mut self, cap: Option<usize>) -> Self {
        self.source_cap = cap;
        self
    }

    pub fn with_exploration_slots(mut self, slots: usize) -> Self {
        self.exploration_slots = slots;
        self
    }

    pub fn with_exploration_k(mut self, k: f64) -> Self {
        self.exploration_k = k;
        self
    }

    pub fn with_min_core_score(mut self, min: f64) -> Self {
        self.min_core_score = min;
        self
    }

    pub fn with_min_completeness(mut self, min: f64) -> Self {
        self.min_completeness = min;
        self
    }

    pub fn with_explore_reason(mut self, tag: bool) -> Self {
        self.tag_explore_reason = tag;
        self
    }

    pub fn validate(&self) -> Result<(), RankError> {
        if !self.exploration_k.is_finite() || self.exploration_k < 0.0 {
            return Err(RankError::InvalidExplorationK(self.exploration_k));
        }
        if !(0.0..=1.0).contains(&self.min_completeness) {
            return Err(RankError::InvalidMinCompleteness(self.min_completeness));
        }
        if !self.min_core_score.is_finite() {
            return Err(RankError::InvalidMinCoreScore(self.min_core_score));
        }
        Ok(())
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self::v0()
    }
}
