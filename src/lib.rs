//! trade-scatter: rendering-agnostic core for an interactive trade scatterplot.
//!
//! Trade records are grouped by year, a session keeps the selected year and its
//! visible records, and a `Presenter` turns each change into scales, legend,
//! bubbles and year bars. `ScenePresenter` is a headless presenter that
//! reconciles bubbles by country and animates changes on an explicit clock.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TradeSession, ViewConfig};
pub use error::{TradeError, TradeResult};
