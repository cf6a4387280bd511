pub mod record;
pub mod value;

pub use crate::types::identifiers::RecordId;
pub use record::{
    DesiredFilters, Record, ID_FIELD, SOURCE_FIELD, SPECIAL_NEEDS_FIELD, UNKNOWN_SOURCE,
};
pub use value::{AttrValue, Attributes};
