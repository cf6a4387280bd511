use crate::record::Record;

use super::profile::ScoringProfile;

/// Fraction of the profile's tracked fields that are present on `record`.
///
/// Presence only: a known `false` counts the same as a known `true`.
/// A profile that tracks nothing reports every record as complete.
pub fn completeness(record: &Record, profile: &ScoringProfile) -> f64 {
    let tracked = profile.completeness_fields.len();
    if tracked == 0 {
        return 1.0;
    }

    let present = profile
        .completeness_fields
        .iter()
        .filter(|field| record.is_present(field))
        .count();

    present as f64 / tracked as f64
}
