use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::value::{AttrValue, Attributes};
use crate::types::identifiers::RecordId;

pub const ID_FIELD: &str = "id";
pub const SOURCE_FIELD: &str = "source_id";
pub const SPECIAL_NEEDS_FIELD: &str = "special_needs";

/// Source bucket for records that do not name their origin.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// One adoptable-animal record as supplied by the catalog.
///
/// The engine only reads records. Everything it derives lives on the
/// scored wrapper, never here. The id is also visible as the `id`
/// attribute so preferences can target it like any other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordFields", into = "RecordFields")]
pub struct Record {
    pub id: RecordId,
    pub attributes: Attributes,
}

/// Wire form: `id` plus the remaining attributes, flattened.
#[derive(Serialize, Deserialize)]
struct RecordFields {
    id: RecordId,
    #[serde(flatten)]
    attributes: Attributes,
}

impl From<RecordFields> for Record {
    fn from(fields: RecordFields) -> Self {
        Record::with_attributes(fields.id, fields.attributes)
    }
}

impl From<Record> for RecordFields {
    fn from(record: Record) -> Self {
        let mut attributes = record.attributes;
        attributes.remove(ID_FIELD);
        RecordFields {
            id: record.id,
            attributes,
        }
    }
}

impl Record {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Record::with_attributes(id.into(), Attributes::new())
    }

    fn with_attributes(id: RecordId, mut attributes: Attributes) -> Self {
        attributes.insert(ID_FIELD, id.as_str());
        Record { id, attributes }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&AttrValue> {
        self.attributes.get(field)
    }

    pub fn is_present(&self, field: &str) -> bool {
        self.attributes.contains(field)
    }

    /// Source bucket for caps and diversity. Falsy or missing values fall
    /// into [`UNKNOWN_SOURCE`]; other non-text values use their match key.
    pub fn source_id(&self) -> Cow<'_, str> {
        match self.get(SOURCE_FIELD) {
            Some(AttrValue::Text(s)) if !s.is_empty() => Cow::Borrowed(s.as_str()),
            Some(value) if value.is_truthy() => Cow::Owned(value.match_key()),
            _ => Cow::Borrowed(UNKNOWN_SOURCE),
        }
    }

    pub fn is_special_needs(&self) -> bool {
        self.get(SPECIAL_NEEDS_FIELD).is_some_and(AttrValue::is_true)
    }
}

/// Coarse targets used for closeness scoring (location, size, age, sex).
///
/// Unlike preferences these never reject a record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesiredFilters(Attributes);

impl DesiredFilters {
    pub fn new() -> Self {
        DesiredFilters(Attributes::new())
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.0.insert(field, value);
        self
    }

    /// A filter counts as given only when it is non-empty text.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get_str(field)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.0
    }
}
