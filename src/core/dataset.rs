use indexmap::IndexSet;
use tracing::debug;

use crate::core::{DeficitIndex, TradeRecord, YearIndex};
use crate::error::TradeResult;

/// Builds both per-year indexes from one loaded table.
///
/// Pure and deterministic for identical input order. Fails with
/// `EmptyDataset` when `records` is empty.
pub fn build_indexes(records: &[TradeRecord]) -> TradeResult<(YearIndex, DeficitIndex)> {
    let year_index = YearIndex::build(records)?;
    let deficit_index = DeficitIndex::build(records)?;
    debug!(
        records = records.len(),
        years = year_index.len(),
        "built year and deficit indexes"
    );
    Ok((year_index, deficit_index))
}

/// Read-only dataset state shared by a session for its whole lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetIndex {
    records: Vec<TradeRecord>,
    years: YearIndex,
    deficits: DeficitIndex,
    continents: IndexSet<String>,
}

impl DatasetIndex {
    pub fn build(records: Vec<TradeRecord>) -> TradeResult<Self> {
        let (years, deficits) = build_indexes(&records)?;
        let continents = records
            .iter()
            .map(|record| record.continent().to_owned())
            .collect();

        Ok(Self {
            records,
            years,
            deficits,
            continents,
        })
    }

    /// Records in load order.
    #[must_use]
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    #[must_use]
    pub fn years(&self) -> &YearIndex {
        &self.years
    }

    #[must_use]
    pub fn deficits(&self) -> &DeficitIndex {
        &self.deficits
    }

    /// Distinct continents in first-appearance order across the whole table.
    #[must_use]
    pub fn continents(&self) -> &IndexSet<String> {
        &self.continents
    }
}
