pub mod evaluation;
pub mod preference;

pub use evaluation::{evaluate, preferences_score, EvaluationNote, PreferenceOutcome, PreferenceScore};
pub use preference::{parse_preferences, Hardness, Preference, PreferenceError};

/// True when any preference asks for special-needs animals.
pub fn opted_into_special_needs(preferences: &[Preference]) -> bool {
    preferences.iter().any(Preference::opts_into_special_needs)
}
