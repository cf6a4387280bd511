use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::types::ranking_result::Candidate;

pub struct CapResult<'s, 'a> {
    pub kept: Vec<&'s Candidate<'a>>,
    pub capped: usize,
}

/// Keep at most `cap` candidates per source, walking in the given order.
///
/// `None` or `Some(0)` keeps everything.
pub fn apply_source_cap<'s, 'a>(
    sorted: &'s [Candidate<'a>],
    cap: Option<usize>,
) -> CapResult<'s, 'a> {
    let cap = match cap {
        Some(cap) if cap > 0 => cap,
        _ => {
            return CapResult {
                kept: sorted.iter().collect(),
                capped: 0,
            }
        }
    };

    let mut kept = Vec::with_capacity(sorted.len());
    let mut counts: BTreeMap<Cow<'_, str>, usize> = BTreeMap::new();
    let mut capped = 0;

    for candidate in sorted {
        let count = counts.entry(candidate.record.source_id()).or_insert(0);
        if *count < cap {
            kept.push(candidate);
            *count += 1;
        } else {
            capped += 1;
        }
    }

    CapResult { kept, capped }
}
