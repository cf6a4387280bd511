use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single attribute value on a record.
///
/// Absence is modeled by the key not being present in [`Attributes`], never
/// by a variant here. JSON `null` is dropped when attributes are deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Arrays and objects are carried through but never matched on.
    Compound(serde_json::Value),
}

impl AttrValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, AttrValue::Bool(true))
    }

    /// Empty text, zero, `false` and empty compounds are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Bool(b) => *b,
            AttrValue::Int(i) => *i != 0,
            AttrValue::Float(f) => *f != 0.0,
            AttrValue::Text(s) => !s.is_empty(),
            AttrValue::Compound(serde_json::Value::Array(items)) => !items.is_empty(),
            AttrValue::Compound(serde_json::Value::Object(map)) => !map.is_empty(),
            AttrValue::Compound(value) => !value.is_null(),
        }
    }

    /// Lowercased textual form used for case-insensitive equality.
    ///
    /// Floats keep their fractional part (`1.0` stays distinct from `1`).
    pub fn match_key(&self) -> String {
        match self {
            AttrValue::Bool(b) => b.to_string(),
            AttrValue::Int(i) => i.to_string(),
            AttrValue::Float(f) => float_key(*f),
            AttrValue::Text(s) => s.to_lowercase(),
            AttrValue::Compound(v) => v.to_string().to_lowercase(),
        }
    }
}

// Shortest round-trip digits; exponent form below 1e-4 and from 1e16 on,
// written with a sign and at least two exponent digits.
fn float_key(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = f.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{f:e}");
        if let Some((mantissa, exponent)) = formatted.split_once('e') {
            if let Ok(exponent) = exponent.parse::<i32>() {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{mantissa}e{sign}{:02}", exponent.abs());
            }
        }
        return formatted;
    }
    format!("{f:?}")
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Option<AttrValue>>",
    into = "BTreeMap<String, AttrValue>"
)]
pub struct Attributes {
    inner: BTreeMap<String, AttrValue>,
}

impl From<BTreeMap<String, Option<AttrValue>>> for Attributes {
    fn from(raw: BTreeMap<String, Option<AttrValue>>) -> Self {
        let inner = raw
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .collect();
        Attributes { inner }
    }
}

impl From<Attributes> for BTreeMap<String, AttrValue> {
    fn from(attrs: Attributes) -> Self {
        attrs.inner
    }
}

impl Attributes {
    pub fn new() -> Self {
        Attributes {
            inner: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.inner.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.inner.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Text value for `key`, treating the empty string as absent.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(AttrValue::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttrValue)> {
        self.inner.iter()
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.inner.remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
