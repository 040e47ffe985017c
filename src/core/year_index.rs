use std::collections::BTreeMap;

use crate::core::TradeRecord;
use crate::error::{TradeError, TradeResult};

/// Records grouped by year, each bucket sorted by imports descending.
///
/// Bucket order is stable: records with equal imports keep their input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YearIndex {
    buckets: BTreeMap<i32, Vec<TradeRecord>>,
}

impl YearIndex {
    /// Groups `records` by year and sorts each bucket by imports descending.
    pub fn build(records: &[TradeRecord]) -> TradeResult<Self> {
        if records.is_empty() {
            return Err(TradeError::EmptyDataset);
        }

        let mut buckets: BTreeMap<i32, Vec<TradeRecord>> = BTreeMap::new();
        for record in records {
            buckets
                .entry(record.year())
                .or_default()
                .push(record.clone());
        }

        sort_buckets(&mut buckets);
        Ok(Self { buckets })
    }

    #[must_use]
    pub fn get(&self, year: i32) -> Option<&[TradeRecord]> {
        self.buckets.get(&year).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, year: i32) -> bool {
        self.buckets.contains_key(&year)
    }

    /// Years present in the index, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.buckets.keys().copied()
    }

    #[must_use]
    pub fn latest_year(&self) -> Option<i32> {
        self.buckets.keys().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, &[TradeRecord])> + '_ {
        self.buckets
            .iter()
            .map(|(year, bucket)| (*year, bucket.as_slice()))
    }

    /// Number of year buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of records across all buckets.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

fn sort_bucket(bucket: &mut [TradeRecord]) {
    // `sort_by` is stable, so equal imports keep input order.
    bucket.sort_by(|a, b| b.imports().total_cmp(&a.imports()));
}

#[cfg(not(feature = "parallel-index"))]
fn sort_buckets(buckets: &mut BTreeMap<i32, Vec<TradeRecord>>) {
    for bucket in buckets.values_mut() {
        sort_bucket(bucket);
    }
}

#[cfg(feature = "parallel-index")]
fn sort_buckets(buckets: &mut BTreeMap<i32, Vec<TradeRecord>>) {
    use rayon::prelude::*;

    let mut slots: Vec<&mut Vec<TradeRecord>> = buckets.values_mut().collect();
    slots
        .par_iter_mut()
        .for_each(|bucket| sort_bucket(bucket.as_mut_slice()));
}
