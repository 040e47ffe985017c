pub mod dataset;
pub mod deficit_index;
pub mod loader;
pub mod record;
pub mod scale;
pub mod types;
pub mod year_index;

pub use dataset::{DatasetIndex, build_indexes};
pub use deficit_index::{DeficitIndex, YearDeficit};
pub use loader::{load_records_from_path, load_records_from_reader, parse_records_str};
pub use record::TradeRecord;
pub use scale::{BandScale, LinearScale, SqrtScale, nice_domain, tick_increment, ticks};
pub use types::{Point, Viewport};
pub use year_index::YearIndex;
