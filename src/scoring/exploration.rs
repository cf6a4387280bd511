use crate::catalog::ViewCounts;
use crate::types::identifiers::RecordId;

/// Novelty boost: `k / sqrt(1 + views)`.
pub fn exploration_bonus(id: &RecordId, views: &ViewCounts, k: f64) -> f64 {
    let seen = views.get(id) as f64;
    k / (1.0 + seen).sqrt()
}
