use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::{AttrValue, SPECIAL_NEEDS_FIELD};

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid weight {weight} for preference on {field}: must be finite and > 0")]
    InvalidWeight { field: String, weight: f64 },
    #[error("Unknown hardness: {0}")]
    UnknownHardness(String),
    #[error("Preferences must be a JSON object or array of objects")]
    NotAnObject,
    #[error("Preference at position {0} has no field")]
    MissingField(usize),
}

/// Strictness tier of a preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Hardness {
    /// Conflicts reject the record outright.
    Must,
    /// Full weight bonus or penalty.
    Strong,
    /// Half weight bonus or penalty.
    #[default]
    Nice,
}

impl TryFrom<String> for Hardness {
    type Error = PreferenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "must" => Ok(Hardness::Must),
            "strong" => Ok(Hardness::Strong),
            "nice" => Ok(Hardness::Nice),
            _ => Err(PreferenceError::UnknownHardness(value)),
        }
    }
}

fn default_weight() -> f64 {
    1.0
}

fn default_target() -> Option<AttrValue> {
    Some(AttrValue::Bool(true))
}

/// One caller-weighted requirement on a record field.
///
/// `value: None` means the preference has no target and is a pure
/// boolean ask ("is this field true?").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    pub field: String,
    #[serde(default)]
    pub hardness: Hardness,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default = "default_target")]
    pub value: Option<AttrValue>,
    #[serde(default)]
    pub must_be_known: bool,
}

impl Preference {
    pub fn new(field: impl Into<String>, hardness: Hardness) -> Self {
        Self {
            field: field.into(),
            hardness,
            weight: default_weight(),
            value: default_target(),
            must_be_known: false,
        }
    }

    pub fn must(field: impl Into<String>) -> Self {
        Self::new(field, Hardness::Must)
    }

    pub fn strong(field: impl Into<String>) -> Self {
        Self::new(field, Hardness::Strong)
    }

    pub fn nice(field: impl Into<String>) -> Self {
        Self::new(field, Hardness::Nice)
    }

    pub fn with_value(mut self, value: impl Into<AttrValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn without_target(mut self) -> Self {
        self.value = None;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn must_be_known(mut self) -> Self {
        self.must_be_known = true;
        self
    }

    /// Whether this preference asks for special-needs animals, which lifts
    /// the default special-needs penalty in base scoring.
    pub fn opts_into_special_needs(&self) -> bool {
        self.field == SPECIAL_NEEDS_FIELD && self.value.as_ref().is_some_and(AttrValue::is_true)
    }

    /// Weights must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), PreferenceError> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(PreferenceError::InvalidWeight {
                field: self.field.clone(),
                weight: self.weight,
            });
        }
        Ok(())
    }
}

/// Wire form accepted by [`parse_preferences`]. `field` is optional because
/// the object form carries it as the key.
#[derive(Debug, Deserialize)]
struct PreferenceEntry {
    field: Option<String>,
    #[serde(default)]
    hardness: Hardness,
    #[serde(default = "default_weight")]
    weight: f64,
    #[serde(default = "default_target")]
    value: Option<AttrValue>,
    must_be_known: Option<bool>,
    allow_unknown: Option<bool>,
}

impl PreferenceEntry {
    fn into_preference(self, field: String) -> Result<Preference, PreferenceError> {
        let must_be_known = match (self.must_be_known, self.allow_unknown) {
            (Some(known), _) => known,
            (None, Some(allow)) => !allow,
            (None, None) => false,
        };
        let pref = Preference {
            field,
            hardness: self.hardness,
            weight: self.weight,
            value: self.value,
            must_be_known,
        };
        pref.validate()?;
        Ok(pref)
    }
}

/// Parse preferences from JSON.
///
/// Accepts either `{"good_with_kids": {"hardness": "must"}, ...}` (evaluated
/// in the order written) or `[{"field": "good_with_kids", ...}, ...]`.
/// Blank input yields no preferences.
pub fn parse_preferences(raw: &str) -> Result<Vec<Preference>, PreferenceError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<serde_json::Value>(raw)? {
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(field, cfg)| {
                if !cfg.is_object() {
                    return Err(PreferenceError::NotAnObject);
                }
                let entry: PreferenceEntry = serde_json::from_value(cfg)?;
                entry.into_preference(field)
            })
            .collect(),
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let mut entry: PreferenceEntry = serde_json::from_value(item)?;
                let field = entry.field.take().ok_or(PreferenceError::MissingField(i))?;
                entry.into_preference(field)
            })
            .collect(),
        _ => Err(PreferenceError::NotAnObject),
    }
}
