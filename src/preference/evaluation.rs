use std::fmt;

use super::preference::{Hardness, Preference};
use crate::record::{AttrValue, Record};
use crate::types::ranking_result::{Effect, Reason};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationNote {
    UnknownNotAllowed,
    Unknown,
    ExplicitConflict,
    Mismatch,
    ExplicitFalse,
    Match,
    Conflict,
    Neutral,
}

impl fmt::Display for EvaluationNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EvaluationNote::UnknownNotAllowed => "unknown not allowed",
            EvaluationNote::Unknown => "unknown",
            EvaluationNote::ExplicitConflict => "explicit conflict",
            EvaluationNote::Mismatch => "mismatch",
            EvaluationNote::ExplicitFalse => "explicit false",
            EvaluationNote::Match => "match",
            EvaluationNote::Conflict => "conflict",
            EvaluationNote::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreferenceOutcome {
    Scored {
        contribution: f64,
        note: EvaluationNote,
    },
    Rejected {
        note: EvaluationNote,
    },
}

impl PreferenceOutcome {
    fn scored(contribution: f64, note: EvaluationNote) -> Self {
        PreferenceOutcome::Scored { contribution, note }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, PreferenceOutcome::Rejected { .. })
    }

    pub fn contribution(&self) -> f64 {
        match self {
            PreferenceOutcome::Scored { contribution, .. } => *contribution,
            PreferenceOutcome::Rejected { .. } => 0.0,
        }
    }
}

/// Evaluate one preference against one record.
pub fn evaluate(pref: &Preference, record: &Record) -> PreferenceOutcome {
    let value = record.get(&pref.field);

    if pref.must_be_known && value.is_none() {
        return PreferenceOutcome::Rejected {
            note: EvaluationNote::UnknownNotAllowed,
        };
    }
    let Some(value) = value else {
        return PreferenceOutcome::scored(0.0, EvaluationNote::Unknown);
    };

    match pref.hardness {
        Hardness::Must => evaluate_must(pref, value),
        Hardness::Strong | Hardness::Nice => evaluate_soft(pref, value),
    }
}

/// Must rules. With no target the field is a boolean ask: explicit `false`
/// rejects, `true` (or a numeric one) earns the weight, any other truthy
/// value is a zero-weight match and a falsy one reads as unknown.
fn evaluate_must(pref: &Preference, value: &AttrValue) -> PreferenceOutcome {
    let target = pref.value.as_ref();

    if let (Some(actual), Some(wanted)) = (value.as_bool(), target.and_then(AttrValue::as_bool)) {
        if actual != wanted {
            return PreferenceOutcome::Rejected {
                note: EvaluationNote::ExplicitConflict,
            };
        }
        return PreferenceOutcome::scored(pref.weight, EvaluationNote::Match);
    }

    if let Some(target) = target {
        if value.match_key() != target.match_key() {
            return PreferenceOutcome::Rejected {
                note: EvaluationNote::Mismatch,
            };
        }
        return PreferenceOutcome::scored(pref.weight, EvaluationNote::Match);
    }

    match value {
        AttrValue::Bool(false) => PreferenceOutcome::Rejected {
            note: EvaluationNote::ExplicitFalse,
        },
        AttrValue::Bool(true) | AttrValue::Int(1) => {
            PreferenceOutcome::scored(pref.weight, EvaluationNote::Match)
        }
        AttrValue::Float(f) if *f == 1.0 => {
            PreferenceOutcome::scored(pref.weight, EvaluationNote::Match)
        }
        other if other.is_truthy() => PreferenceOutcome::scored(0.0, EvaluationNote::Match),
        _ => PreferenceOutcome::scored(0.0, EvaluationNote::Unknown),
    }
}

fn evaluate_soft(pref: &Preference, value: &AttrValue) -> PreferenceOutcome {
    let magnitude = match pref.hardness {
        Hardness::Strong => pref.weight,
        _ => pref.weight / 2.0,
    };

    if let Some(flag) = value.as_bool() {
        return if flag {
            PreferenceOutcome::scored(magnitude, EvaluationNote::Match)
        } else {
            PreferenceOutcome::scored(-magnitude, EvaluationNote::Conflict)
        };
    }

    let Some(target) = pref.value.as_ref() else {
        return PreferenceOutcome::scored(0.0, EvaluationNote::Neutral);
    };
    if value.match_key() == target.match_key() {
        PreferenceOutcome::scored(magnitude, EvaluationNote::Match)
    } else {
        PreferenceOutcome::scored(-magnitude, EvaluationNote::Conflict)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceScore {
    /// Weighted average of contributions, roughly within `[-1, 1]`.
    pub total: f64,
    pub dropped: bool,
    pub reasons: Vec<Reason>,
}

/// Aggregate all preferences for one record, stopping at the first rejection.
pub fn preferences_score(preferences: &[Preference], record: &Record) -> PreferenceScore {
    let mut total = 0.0;
    let mut active_weights = 0.0;
    let mut reasons = Vec::with_capacity(preferences.len());

    for pref in preferences {
        let (contribution, note) = match evaluate(pref, record) {
            PreferenceOutcome::Rejected { note } => {
                reasons.push(Reason::new(
                    &pref.field,
                    Effect::Drop,
                    format!("Must failed: {note}"),
                ));
                return PreferenceScore {
                    total: 0.0,
                    dropped: true,
                    reasons,
                };
            }
            PreferenceOutcome::Scored { contribution, note } => (contribution, note),
        };

        total += contribution;
        active_weights += pref.weight.abs();

        let reason = if contribution > 0.0 {
            Reason::new(&pref.field, Effect::Match, format!("{} matched", pref.field))
        } else if contribution < 0.0 {
            Reason::new(&pref.field, Effect::Negative, format!("{} conflicted", pref.field))
        } else {
            Reason::new(&pref.field, Effect::Neutral, format!("{} {note}", pref.field))
        };
        reasons.push(reason);
    }

    if active_weights > 0.0 {
        total /= active_weights;
    }

    PreferenceScore {
        total,
        dropped: false,
        reasons,
    }
}
