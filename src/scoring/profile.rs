use serde::{Deserialize, Serialize};

// Serializable, comparable, explicit defaults.
// Folded into the config version of every ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringProfile {
    /// Fields counted toward completeness.
    pub completeness_fields: Vec<String>,
    /// Size categories, smallest first.
    pub size_order: Vec<String>,
    /// Age groups, youngest first.
    pub age_order: Vec<String>,
}

impl ScoringProfile {
    pub fn v0() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            completeness_fields: owned(&[
                "good_with_kids",
                "good_with_dogs",
                "good_with_cats",
                "size",
                "age_group",
                "energy_level",
                "house_trained",
                "special_needs",
                "needs_foster",
                "vaccinations_up_to_date",
                "spayed_neutered",
                "location_label",
                "status",
            ]),
            size_order: owned(&["XS", "S", "M", "L", "XL"]),
            age_order: owned(&["Puppy", "Young", "Adult", "Senior"]),
        }
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::v0()
    }
}
