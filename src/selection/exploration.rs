//! Orderings for the explore section.
//!
//! Both orderings are explicit multi-key comparisons. Key order encodes
//! tie-break priority and must not be rearranged.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::catalog::ViewCounts;
use crate::record::{AttrValue, DesiredFilters, Record};
use crate::scoring::base::SEX_FIELD;
use crate::scoring::{age_closeness, location_match, size_closeness, ScoringProfile};
use crate::types::ranking_result::Candidate;

fn ascending(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Primary explore key: fewest views, then sources least seen in the best
/// section, then least complete, then not special-needs, then highest score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExploreKey {
    pub views: u64,
    pub source_hits_in_best: usize,
    pub completeness: f64,
    pub special_needs: bool,
    pub final_score: f64,
}

impl ExploreKey {
    pub fn for_candidate(
        candidate: &Candidate<'_>,
        views: &ViewCounts,
        best_sources: &BTreeMap<Cow<'_, str>, usize>,
    ) -> Self {
        let record = candidate.record;
        Self {
            views: views.get(&record.id),
            source_hits_in_best: best_sources
                .get(record.source_id().as_ref())
                .copied()
                .unwrap_or(0),
            completeness: candidate.completeness,
            special_needs: record.is_special_needs(),
            final_score: candidate.final_score,
        }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        self.views
            .cmp(&other.views)
            .then(self.source_hits_in_best.cmp(&other.source_hits_in_best))
            .then_with(|| ascending(self.completeness, other.completeness))
            .then(self.special_needs.cmp(&other.special_needs))
            .then_with(|| ascending(other.final_score, self.final_score))
    }
}

/// Fallback key: closest to the desired filters first (location, size, age,
/// sex), then not special-needs, fewest views, least complete, highest score.
/// Missing closeness terms count as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackKey {
    pub location: f64,
    pub size: f64,
    pub age: f64,
    pub sex: f64,
    pub special_needs: bool,
    pub views: u64,
    pub completeness: f64,
    pub final_score: f64,
}

impl FallbackKey {
    pub fn for_candidate(
        candidate: &Candidate<'_>,
        desired: &DesiredFilters,
        views: &ViewCounts,
        profile: &ScoringProfile,
    ) -> Self {
        let record = candidate.record;
        Self {
            location: location_match(record, desired).map_or(0.0, |m| m.score()),
            size: size_closeness(record, desired, profile).unwrap_or(0.0),
            age: age_closeness(record, desired, profile).unwrap_or(0.0),
            sex: sex_match(record, desired),
            special_needs: record.is_special_needs(),
            views: views.get(&record.id),
            completeness: candidate.completeness,
            final_score: candidate.final_score,
        }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        ascending(other.location, self.location)
            .then_with(|| ascending(other.size, self.size))
            .then_with(|| ascending(other.age, self.age))
            .then_with(|| ascending(other.sex, self.sex))
            .then(self.special_needs.cmp(&other.special_needs))
            .then(self.views.cmp(&other.views))
            .then_with(|| ascending(self.completeness, other.completeness))
            .then_with(|| ascending(other.final_score, self.final_score))
    }
}

fn sex_match(record: &Record, desired: &DesiredFilters) -> f64 {
    let Some(wants) = desired.get_str(SEX_FIELD) else {
        return 0.0;
    };
    let actual = record
        .get(SEX_FIELD)
        .map(AttrValue::match_key)
        .unwrap_or_default();
    if actual == wants.to_lowercase() {
        1.0
    } else {
        0.0
    }
}

/// Candidates that clear both gates, in explore order.
pub fn explore_pool<'s, 'a>(
    remainder: &[&'s Candidate<'a>],
    best_sources: &BTreeMap<Cow<'_, str>, usize>,
    views: &ViewCounts,
    min_core_score: f64,
    min_completeness: f64,
) -> Vec<&'s Candidate<'a>> {
    let mut keyed: Vec<(ExploreKey, &'s Candidate<'a>)> = remainder
        .iter()
        .filter(|c| c.core_score >= min_core_score && c.completeness >= min_completeness)
        .map(|c| (ExploreKey::for_candidate(c, views, best_sources), *c))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| a.compare(b));
    keyed.into_iter().map(|(_, c)| c).collect()
}

/// All given candidates, ungated, in fallback order.
pub fn fallback_pool<'s, 'a>(
    candidates: &[&'s Candidate<'a>],
    desired: &DesiredFilters,
    views: &ViewCounts,
    profile: &ScoringProfile,
) -> Vec<&'s Candidate<'a>> {
    let mut keyed: Vec<(FallbackKey, &'s Candidate<'a>)> = candidates
        .iter()
        .map(|c| (FallbackKey::for_candidate(c, desired, views, profile), *c))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| a.compare(b));
    keyed.into_iter().map(|(_, c)| c).collect()
}
