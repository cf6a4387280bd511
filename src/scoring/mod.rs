pub mod base;
pub mod completeness;
pub mod exploration;
pub mod profile;

use crate::catalog::ViewCounts;
use crate::preference::{opted_into_special_needs, preferences_score};
use crate::record::{DesiredFilters, Record};
use crate::types::ranking_result::{Candidate, RankQuery, Reason};

pub use base::{
    age_closeness, base_score, closeness, location_match, size_closeness, status_score,
    BaseScore, LocationMatch,
};
pub use completeness::completeness;
pub use exploration::exploration_bonus;
pub use profile::ScoringProfile;

/// Preference-independent desirability of a record.
pub trait BaseScorer {
    fn score(
        &self,
        record: &Record,
        desired: &DesiredFilters,
        opted_in_special_needs: bool,
        profile: &ScoringProfile,
    ) -> BaseScore;
}

/// v0: status, special-needs, location, size and age closeness, averaged.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardBaseScorer;

impl BaseScorer for StandardBaseScorer {
    fn score(
        &self,
        record: &Record,
        desired: &DesiredFilters,
        opted_in_special_needs: bool,
        profile: &ScoringProfile,
    ) -> BaseScore {
        base_score(record, desired, opted_in_special_needs, profile)
    }
}

#[derive(Debug, Clone)]
pub enum ScoreOutcome<'a> {
    Scored(Candidate<'a>),
    /// A preference rejected the record. The last reason is the `drop` one.
    Rejected { reasons: Vec<Reason> },
}

/// Score a single record. Pure: depends only on its arguments.
pub fn score_record<'a, S>(
    scorer: &S,
    record: &'a Record,
    query: &RankQuery,
    views: &ViewCounts,
    exploration_k: f64,
    profile: &ScoringProfile,
) -> ScoreOutcome<'a>
where
    S: BaseScorer + ?Sized,
{
    let prefs = preferences_score(&query.preferences, record);
    if prefs.dropped {
        return ScoreOutcome::Rejected {
            reasons: prefs.reasons,
        };
    }

    let opted_in = opted_into_special_needs(&query.preferences);
    let base = scorer.score(record, &query.desired, opted_in, profile);

    let core_score = base.score + prefs.total;
    let bonus = exploration_bonus(&record.id, views, exploration_k);

    let mut reasons = prefs.reasons;
    reasons.extend(base.reasons);

    ScoreOutcome::Scored(Candidate {
        record,
        base_score: base.score,
        pref_score: prefs.total,
        core_score,
        exploration_bonus: bonus,
        final_score: core_score + bonus,
        completeness: completeness(record, profile),
        reasons,
    })
}
