use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::core::TradeRecord;
use crate::error::{TradeError, TradeResult};

pub const COUNTRY_COLUMN: &str = "Country";
pub const CONTINENT_COLUMN: &str = "Continent";
pub const YEAR_COLUMN: &str = "Year";
pub const EXPORTS_COLUMN: &str = "Exports";
pub const IMPORTS_COLUMN: &str = "Imports";

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    country: usize,
    continent: usize,
    year: usize,
    exports: usize,
    imports: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &csv::StringRecord) -> TradeResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| TradeError::MissingColumn(name.to_owned()))
        };

        Ok(Self {
            country: find(COUNTRY_COLUMN)?,
            continent: find(CONTINENT_COLUMN)?,
            year: find(YEAR_COLUMN)?,
            exports: find(EXPORTS_COLUMN)?,
            imports: find(IMPORTS_COLUMN)?,
        })
    }
}

/// Loads trade records from a CSV file on disk.
pub fn load_records_from_path(path: impl AsRef<Path>) -> TradeResult<Vec<TradeRecord>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading trade table");
    let file = File::open(path)?;
    load_records_from_reader(file)
}

/// Loads trade records from CSV text.
pub fn parse_records_str(input: &str) -> TradeResult<Vec<TradeRecord>> {
    load_records_from_reader(input.as_bytes())
}

/// Loads trade records from any CSV source with a header row.
///
/// Required columns are matched by exact (case-sensitive) name in any order;
/// extra columns are ignored. The whole load fails on the first bad row, so
/// callers never observe a partial dataset.
pub fn load_records_from_reader<R: Read>(reader: R) -> TradeResult<Vec<TradeRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let layout = ColumnLayout::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, csv::Position::line);
        records.push(parse_row(&row, layout, line)?);
    }

    if records.is_empty() {
        return Err(TradeError::EmptyDataset);
    }

    debug!(count = records.len(), "loaded trade records");
    Ok(records)
}

fn parse_row(
    row: &csv::StringRecord,
    layout: ColumnLayout,
    line: u64,
) -> TradeResult<TradeRecord> {
    let field = |index: usize| row.get(index).unwrap_or_default();

    let year = parse_year(field(layout.year))
        .ok_or_else(|| malformed(line, YEAR_COLUMN, field(layout.year)))?;
    let exports = parse_amount(field(layout.exports))
        .ok_or_else(|| malformed(line, EXPORTS_COLUMN, field(layout.exports)))?;
    let imports = parse_amount(field(layout.imports))
        .ok_or_else(|| malformed(line, IMPORTS_COLUMN, field(layout.imports)))?;

    TradeRecord::new(
        field(layout.country),
        field(layout.continent),
        year,
        exports,
        imports,
    )
}

/// Accepts plain integers and integral decimals such as `2017.0`.
fn parse_year(raw: &str) -> Option<i32> {
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX) {
        #[allow(clippy::cast_possible_truncation)]
        return Some(value as i32);
    }
    None
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

fn malformed(line: u64, column: &str, value: &str) -> TradeError {
    TradeError::MalformedRecord {
        line,
        column: column.to_owned(),
        value: value.to_owned(),
    }
}
