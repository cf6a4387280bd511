//! Deterministic preference matching and ranking for adoptable-animal catalogs.
//!
//! `adoption-match` scores catalog records against a requester's weighted
//! preferences and coarse filters, then assembles a two-tier result: a
//! "best" section by relevance and an "explore" section that surfaces
//! under-viewed, lower-information records. Every score comes with
//! human-readable reasons. Identical inputs always produce identical output.
//!
//! ```
//! use adoption_match::catalog::ViewCounts;
//! use adoption_match::preference::Preference;
//! use adoption_match::record::{DesiredFilters, Record};
//! use adoption_match::selection::{rank, RankConfig};
//! use adoption_match::types::RankQuery;
//!
//! let records = vec![
//!     Record::new("a").with("status", "Available").with("good_with_kids", true),
//!     Record::new("b").with("status", "Pending").with("good_with_kids", false),
//! ];
//! let query = RankQuery::new(
//!     vec![Preference::must("good_with_kids")],
//!     DesiredFilters::new(),
//! );
//!
//! let result = rank(&records, &query, &ViewCounts::new(), RankConfig::v0()).unwrap();
//! assert_eq!(result.ids(), vec!["a"]);
//! ```

pub mod catalog;
pub mod preference;
pub mod record;
pub mod scoring;
pub mod selection;
pub mod types;
