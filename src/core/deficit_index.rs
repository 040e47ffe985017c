use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::TradeRecord;
use crate::error::{TradeError, TradeResult};

/// Absolute summed trade balance for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearDeficit {
    pub year: i32,
    pub magnitude: f64,
}

/// Per-year trade deficit magnitudes, ordered by year descending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeficitIndex {
    entries: Vec<YearDeficit>,
}

impl DeficitIndex {
    pub fn build(records: &[TradeRecord]) -> TradeResult<Self> {
        if records.is_empty() {
            return Err(TradeError::EmptyDataset);
        }

        let mut sums: BTreeMap<i32, f64> = BTreeMap::new();
        for record in records {
            *sums.entry(record.year()).or_insert(0.0) += record.balance();
        }

        let entries = sums
            .into_iter()
            .rev()
            .map(|(year, sum)| YearDeficit {
                year,
                magnitude: sum.abs(),
            })
            .collect();
        Ok(Self { entries })
    }

    #[must_use]
    pub fn get(&self, year: i32) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.year == year)
            .map(|entry| entry.magnitude)
    }

    /// Entries in year-descending order.
    #[must_use]
    pub fn entries(&self) -> &[YearDeficit] {
        &self.entries
    }

    #[must_use]
    pub fn max_magnitude(&self) -> f64 {
        self.entries
            .iter()
            .map(|entry| entry.magnitude)
            .fold(0.0, f64::max)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
