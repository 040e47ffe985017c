use indexmap::{IndexMap, IndexSet};
use tracing::warn;

use crate::core::TradeRecord;

/// Result of diffing a keyed element set against new records.
///
/// The three sets are disjoint. `added` and `moved` follow the order of the
/// new records; `removed` follows the order of the previous elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyedDiff<'a> {
    pub added: Vec<&'a TradeRecord>,
    pub moved: Vec<&'a TradeRecord>,
    pub removed: Vec<String>,
}

impl KeyedDiff<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.moved.is_empty() && self.removed.is_empty()
    }
}

/// Diffs `previous` elements against `next` records keyed by country.
///
/// A country appearing more than once in `next` keeps its first record; later
/// duplicates are dropped.
pub fn reconcile<'a, V>(
    previous: &IndexMap<String, V>,
    next: &'a [TradeRecord],
) -> KeyedDiff<'a> {
    let mut diff = KeyedDiff::default();
    let mut seen: IndexSet<&str> = IndexSet::with_capacity(next.len());

    for record in next {
        if !seen.insert(record.country()) {
            warn!(country = record.country(), "dropping duplicate bubble key");
            continue;
        }
        if previous.contains_key(record.country()) {
            diff.moved.push(record);
        } else {
            diff.added.push(record);
        }
    }

    diff.removed = previous
        .keys()
        .filter(|key| !seen.contains(key.as_str()))
        .cloned()
        .collect();
    diff
}
