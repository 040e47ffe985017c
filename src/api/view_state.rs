use serde::Serialize;
use tracing::{debug, warn};

use crate::core::{TradeRecord, YearIndex};
use crate::error::{TradeError, TradeResult};

/// Read-only copy of the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub selected_year: i32,
    pub visible_records: Vec<TradeRecord>,
}

impl ViewSnapshot {
    pub fn to_json_pretty(&self) -> TradeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TradeError::InvalidData(format!("failed to serialize view snapshot: {e}"))
        })
    }
}

/// Active year filter and the records it exposes.
///
/// `visible_records` always equals the selected year's bucket truncated to
/// `top_k`; `select_year` is the only writer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    selected_year: i32,
    top_k: Option<usize>,
    visible_records: Vec<TradeRecord>,
}

impl ViewState {
    pub fn new(index: &YearIndex, initial_year: i32, top_k: Option<usize>) -> TradeResult<Self> {
        let visible_records = visible_slice(index, initial_year, top_k)?.to_vec();
        Ok(Self {
            selected_year: initial_year,
            top_k,
            visible_records,
        })
    }

    /// Switches the active year and recomputes the visible records.
    ///
    /// Unknown years are rejected without touching the current state.
    pub fn select_year(&mut self, index: &YearIndex, year: i32) -> TradeResult<()> {
        let visible = match visible_slice(index, year, self.top_k) {
            Ok(visible) => visible,
            Err(err) => {
                warn!(year, current = self.selected_year, "rejecting unknown year");
                return Err(err);
            }
        };

        self.visible_records = visible.to_vec();
        self.selected_year = year;
        debug!(year, visible = self.visible_records.len(), "selected year");
        Ok(())
    }

    #[must_use]
    pub fn selected_year(&self) -> i32 {
        self.selected_year
    }

    #[must_use]
    pub fn top_k(&self) -> Option<usize> {
        self.top_k
    }

    #[must_use]
    pub fn visible_records(&self) -> &[TradeRecord] {
        &self.visible_records
    }

    #[must_use]
    pub fn current_view(&self) -> ViewSnapshot {
        ViewSnapshot {
            selected_year: self.selected_year,
            visible_records: self.visible_records.clone(),
        }
    }

    /// Largest import volume among the visible records, `0.0` when none.
    #[must_use]
    pub fn max_visible_imports(&self) -> f64 {
        self.visible_records
            .iter()
            .map(TradeRecord::imports)
            .fold(0.0, f64::max)
    }
}

fn visible_slice(
    index: &YearIndex,
    year: i32,
    top_k: Option<usize>,
) -> TradeResult<&[TradeRecord]> {
    let bucket = index.get(year).ok_or(TradeError::UnknownYear { year })?;
    let len = top_k.map_or(bucket.len(), |limit| limit.min(bucket.len()));
    Ok(&bucket[..len])
}
