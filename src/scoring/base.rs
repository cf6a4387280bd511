use crate::record::{DesiredFilters, Record, SPECIAL_NEEDS_FIELD};
use crate::types::ranking_result::{Effect, Reason};

use super::profile::ScoringProfile;

pub const STATUS_FIELD: &str = "status";
pub const LOCATION_FIELD: &str = "location_label";
pub const REGION_FIELD: &str = "location_state";
pub const SIZE_FIELD: &str = "size";
pub const AGE_FIELD: &str = "age_group";
pub const SEX_FIELD: &str = "sex";

/// Component added when a record needs special care and the caller did not
/// ask for that. It drags the mean down rather than zeroing it.
pub const SPECIAL_NEEDS_COMPONENT: f64 = 0.6;

/// Score returned when no base component applies.
pub const NEUTRAL_BASE_SCORE: f64 = 0.5;

pub fn status_score(status: Option<&str>) -> f64 {
    match status.map(str::to_lowercase).as_deref() {
        Some("available") => 1.0,
        Some("pending") => 0.5,
        _ => 0.25,
    }
}

/// Distance-aware similarity between two ordered categories.
///
/// `None` when either side is missing. Categories outside `order` are
/// treated as far apart.
pub fn closeness(value: Option<&str>, target: Option<&str>, order: &[String]) -> Option<f64> {
    let (value, target) = (value?, target?);
    if value.is_empty() || target.is_empty() {
        return None;
    }
    if value == target {
        return Some(1.0);
    }

    let position = |label: &str| order.iter().position(|o| o == label);
    match (position(value), position(target)) {
        (Some(a), Some(b)) if a.abs_diff(b) == 1 => Some(0.7),
        _ => Some(0.4),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationMatch {
    Exact,
    SameRegion,
    Different,
}

impl LocationMatch {
    pub fn score(self) -> f64 {
        match self {
            LocationMatch::Exact => 1.0,
            LocationMatch::SameRegion => 0.7,
            LocationMatch::Different => 0.4,
        }
    }

    fn reason(self) -> Reason {
        match self {
            LocationMatch::Exact => Reason::new(LOCATION_FIELD, Effect::Base, "location match"),
            LocationMatch::SameRegion => Reason::new(REGION_FIELD, Effect::Base, "same state"),
            LocationMatch::Different => {
                Reason::new(LOCATION_FIELD, Effect::Base, "different location")
            }
        }
    }
}

/// How a record's location relates to the desired one. `None` when no
/// location filter was given.
pub fn location_match(record: &Record, desired: &DesiredFilters) -> Option<LocationMatch> {
    let wants = desired.get_str(LOCATION_FIELD)?.to_lowercase();
    let wants_region = desired
        .get_str(REGION_FIELD)
        .map(str::to_lowercase)
        .unwrap_or_default();

    let label = record
        .attributes
        .get_str(LOCATION_FIELD)
        .map(str::to_lowercase)
        .unwrap_or_default();
    let region = record
        .attributes
        .get_str(REGION_FIELD)
        .map(str::to_lowercase)
        .unwrap_or_default();

    if label == wants {
        Some(LocationMatch::Exact)
    } else if !wants_region.is_empty() && region == wants_region {
        Some(LocationMatch::SameRegion)
    } else {
        Some(LocationMatch::Different)
    }
}

pub fn size_closeness(
    record: &Record,
    desired: &DesiredFilters,
    profile: &ScoringProfile,
) -> Option<f64> {
    closeness(
        record.attributes.get_str(SIZE_FIELD),
        desired.get_str(SIZE_FIELD),
        &profile.size_order,
    )
}

pub fn age_closeness(
    record: &Record,
    desired: &DesiredFilters,
    profile: &ScoringProfile,
) -> Option<f64> {
    closeness(
        record.attributes.get_str(AGE_FIELD),
        desired.get_str(AGE_FIELD),
        &profile.age_order,
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct BaseScore {
    pub score: f64,
    pub reasons: Vec<Reason>,
}

/// Intrinsic desirability: the plain mean of every component that applies.
pub fn base_score(
    record: &Record,
    desired: &DesiredFilters,
    opted_in_special_needs: bool,
    profile: &ScoringProfile,
) -> BaseScore {
    let mut components = Vec::with_capacity(5);
    let mut reasons = Vec::with_capacity(5);

    let status = status_score(record.attributes.get_str(STATUS_FIELD));
    components.push(status);
    reasons.push(Reason::new(
        STATUS_FIELD,
        Effect::Base,
        format!("status score {status:.2}"),
    ));

    if record.is_special_needs() && !opted_in_special_needs {
        components.push(SPECIAL_NEEDS_COMPONENT);
        reasons.push(Reason::new(
            SPECIAL_NEEDS_FIELD,
            Effect::Base,
            "needs special care",
        ));
    }

    if let Some(location) = location_match(record, desired) {
        components.push(location.score());
        reasons.push(location.reason());
    }

    if let Some(size) = size_closeness(record, desired, profile) {
        components.push(size);
        reasons.push(Reason::new(
            SIZE_FIELD,
            Effect::Base,
            format!("size closeness {size:.2}"),
        ));
    }

    if let Some(age) = age_closeness(record, desired, profile) {
        components.push(age);
        reasons.push(Reason::new(
            AGE_FIELD,
            Effect::Base,
            format!("age closeness {age:.2}"),
        ));
    }

    if components.is_empty() {
        return BaseScore {
            score: NEUTRAL_BASE_SCORE,
            reasons,
        };
    }

    let score = components.iter().sum::<f64>() / components.len() as f64;
    debug_assert!((0.0..=1.0).contains(&score), "base score {score} out of range [0.0, 1.0]");
    BaseScore { score, reasons }
}
