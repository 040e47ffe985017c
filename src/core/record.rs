use serde::Serialize;

use crate::error::{TradeError, TradeResult};

/// One country's trade observation for one year.
///
/// Fields are private so a record stays immutable after parsing, and
/// `balance` is always derived from `exports - imports`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    country: String,
    continent: String,
    year: i32,
    imports: f64,
    exports: f64,
    balance: f64,
}

impl TradeRecord {
    /// Builds a record and derives its trade balance.
    ///
    /// Imports and exports must be finite and non-negative.
    pub fn new(
        country: impl Into<String>,
        continent: impl Into<String>,
        year: i32,
        exports: f64,
        imports: f64,
    ) -> TradeResult<Self> {
        for (column, value) in [("Exports", exports), ("Imports", imports)] {
            if !value.is_finite() || value < 0.0 {
                return Err(TradeError::MalformedRecord {
                    line: 0,
                    column: column.to_owned(),
                    value: value.to_string(),
                });
            }
        }

        Ok(Self {
            country: country.into(),
            continent: continent.into(),
            year,
            imports,
            exports,
            balance: exports - imports,
        })
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    #[must_use]
    pub fn continent(&self) -> &str {
        &self.continent
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn imports(&self) -> f64 {
        self.imports
    }

    #[must_use]
    pub fn exports(&self) -> f64 {
        self.exports
    }

    /// Exports minus imports.
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.balance
    }
}
