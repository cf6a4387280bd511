pub mod config;
pub mod exploration;
pub mod source_cap;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use tracing::{debug, info};

use crate::catalog::ViewCounts;
use crate::record::Record;
use crate::scoring::{score_record, BaseScorer, ScoreOutcome, ScoringProfile, StandardBaseScorer};
use crate::types::identifiers::ConfigVersion;
use crate::types::ranking_result::{
    Candidate, Effect, RankError, RankQuery, RankingMetadata, RankingResult, Reason,
    ScoredCandidate, Section,
};
pub use config::RankConfig;
pub use exploration::{explore_pool, fallback_pool, ExploreKey, FallbackKey};
pub use source_cap::{apply_source_cap, CapResult};

pub const EXPLORE_REASON_FIELD: &str = "explore_slot";
pub const EXPLORE_REASON_MESSAGE: &str = "Shown in Explore to surface lower-info animals";

pub struct Ranker<S> {
    scorer: S,
    profile: ScoringProfile,
    config: RankConfig,
}

impl Default for Ranker<StandardBaseScorer> {
    fn default() -> Self {
        Self {
            scorer: StandardBaseScorer,
            profile: ScoringProfile::v0(),
            config: RankConfig::v0(),
        }
    }
}

impl<S> Ranker<S>
where
    S: BaseScorer + Sync,
{
    pub fn new(scorer: S, profile: ScoringProfile, config: RankConfig) -> Self {
        Self {
            scorer,
            profile,
            config,
        }
    }

    pub fn with_config(mut self, config: RankConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_profile(mut self, profile: ScoringProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    pub fn rank(
        &self,
        records: &[Record],
        query: &RankQuery,
        views: &ViewCounts,
    ) -> Result<RankingResult, RankError> {
        let start = Instant::now();
        let config = &self.config;
        config.validate()?;
        query.validate()?;
        let config_version = ConfigVersion::from_config(config, &self.profile)?;

        // 1. Scoring phase
        let outcomes = self.score_all(records, query, views);

        let mut scored: Vec<Candidate<'_>> = Vec::with_capacity(records.len());
        let mut records_dropped = 0;
        for (record, outcome) in records.iter().zip(outcomes) {
            match outcome {
                ScoreOutcome::Scored(candidate) => scored.push(candidate),
                ScoreOutcome::Rejected { reasons } => {
                    records_dropped += 1;
                    debug!(
                        record_id = %record.id,
                        reason = reasons.last().map(|r| r.message.as_str()).unwrap_or_default(),
                        "record_dropped"
                    );
                }
            }
        }

        // 2. Ordering phase: final score desc, stable on ties
        scored.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(Ordering::Equal)
        });

        debug_assert!(scored
            .windows(2)
            .all(|w| w[0].final_score.partial_cmp(&w[1].final_score) != Some(Ordering::Less)));

        // 3. Source cap
        let CapResult {
            kept: capped,
            capped: records_capped,
        } = apply_source_cap(&scored, config.source_cap);

        let top_n = config.top_n;
        let slots = config.exploration_slots;

        let mut metadata = RankingMetadata {
            config_version: config_version.as_str().to_string(),
            top_n,
            records_considered: records.len(),
            records_dropped,
            records_capped,
            best_selected: 0,
            explore_selected: 0,
            explore_from_fallback: 0,
        };

        if slots == 0 || top_n == 0 {
            let candidates: Vec<ScoredCandidate> = capped
                .iter()
                .take(top_n)
                .map(|c| (*c).clone().into_output(Section::Best))
                .collect();
            metadata.best_selected = candidates.len();
            self.log_summary(&metadata, start);
            return Ok(RankingResult {
                candidates,
                ranking: metadata,
            });
        }

        // 4. Best section
        let best_count = top_n.saturating_sub(slots);
        let best: Vec<&Candidate<'_>> = capped.iter().take(best_count).copied().collect();

        let mut best_sources: BTreeMap<Cow<'_, str>, usize> = BTreeMap::new();
        for candidate in &best {
            *best_sources.entry(candidate.record.source_id()).or_insert(0) += 1;
        }

        // 5. Explore section, drawn from the uncapped pool
        let mut used: BTreeSet<&str> = best.iter().map(|c| c.record.id.as_str()).collect();
        let remainder: Vec<&Candidate<'_>> = scored
            .iter()
            .filter(|c| !used.contains(c.record.id.as_str()))
            .collect();

        let mut explore: Vec<&Candidate<'_>> = explore_pool(
            &remainder,
            &best_sources,
            views,
            config.min_core_score,
            config.min_completeness,
        );
        explore.truncate(slots);
        let from_primary = explore.len();
        used.extend(explore.iter().map(|c| c.record.id.as_str()));

        // 6. Fallback fill, ignoring the gates
        if explore.len() < slots {
            let leftovers: Vec<&Candidate<'_>> = remainder
                .iter()
                .copied()
                .filter(|c| !used.contains(c.record.id.as_str()))
                .collect();
            let needed = slots - explore.len();
            let fill = fallback_pool(&leftovers, &query.desired, views, &self.profile);
            explore.extend(fill.into_iter().take(needed));
        }

        // 7. Assemble, then cut to top_n
        let explore_room = top_n - best.len();
        explore.truncate(explore_room);
        metadata.best_selected = best.len();
        metadata.explore_selected = explore.len();
        metadata.explore_from_fallback = explore.len().saturating_sub(from_primary);

        let mut candidates: Vec<ScoredCandidate> = Vec::with_capacity(best.len() + explore.len());
        candidates.extend(best.iter().map(|c| (*c).clone().into_output(Section::Best)));
        candidates.extend(explore.iter().map(|c| {
            let mut candidate = (*c).clone();
            if config.tag_explore_reason {
                candidate.reasons.push(Reason::new(
                    EXPLORE_REASON_FIELD,
                    Effect::Explore,
                    EXPLORE_REASON_MESSAGE,
                ));
            }
            candidate.into_output(Section::Explore)
        }));

        debug_assert!(candidates.len() <= top_n);

        self.log_summary(&metadata, start);
        Ok(RankingResult {
            candidates,
            ranking: metadata,
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all<'a>(
        &self,
        records: &'a [Record],
        query: &RankQuery,
        views: &ViewCounts,
    ) -> Vec<ScoreOutcome<'a>> {
        records
            .iter()
            .map(|record| {
                score_record(
                    &self.scorer,
                    record,
                    query,
                    views,
                    self.config.exploration_k,
                    &self.profile,
                )
            })
            .collect()
    }

    // Order-preserving collect keeps output identical to the sequential path.
    #[cfg(feature = "parallel")]
    fn score_all<'a>(
        &self,
        records: &'a [Record],
        query: &RankQuery,
        views: &ViewCounts,
    ) -> Vec<ScoreOutcome<'a>> {
        use rayon::prelude::*;

        records
            .par_iter()
            .map(|record| {
                score_record(
                    &self.scorer,
                    record,
                    query,
                    views,
                    self.config.exploration_k,
                    &self.profile,
                )
            })
            .collect()
    }

    fn log_summary(&self, metadata: &RankingMetadata, start: Instant) {
        info!(
            considered = metadata.records_considered,
            dropped = metadata.records_dropped,
            capped = metadata.records_capped,
            best = metadata.best_selected,
            explore = metadata.explore_selected,
            fallback = metadata.explore_from_fallback,
            elapsed_micros = start.elapsed().as_micros() as u64,
            "rank_complete"
        );
    }
}

/// Rank `records` with the standard scorer and profile.
pub fn rank(
    records: &[Record],
    query: &RankQuery,
    views: &ViewCounts,
    config: RankConfig,
) -> Result<RankingResult, RankError> {
    Ranker::<StandardBaseScorer>::default()
        .with_config(config)
        .rank(records, query, views)
}
