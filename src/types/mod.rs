pub mod identifiers;
pub mod ranking_result;

pub use identifiers::{CatalogVersion, ConfigVersion, RecordId};
pub use ranking_result::{
    Candidate, Effect, RankError, RankQuery, RankingMetadata, RankingResult, Reason,
    ScoredCandidate, Section,
};
