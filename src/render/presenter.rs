use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::TradeRecord;
use crate::error::TradeResult;
use crate::interaction::{SessionPhase, ViewEvent};

/// One bar of the year selector.
///
/// `on_click` is the event the host routes back to
/// `TradeSession::dispatch` when the bar is activated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearBar {
    pub year: i32,
    pub magnitude: f64,
    pub on_click: ViewEvent,
}

impl YearBar {
    #[must_use]
    pub fn new(year: i32, magnitude: f64) -> Self {
        Self {
            year,
            magnitude,
            on_click: ViewEvent::year_selected(year),
        }
    }
}

/// Contract between a session and whatever draws the scene.
///
/// The session decides what to show; presenters decide how. Implementations
/// receive data by reference and must not retain the session.
pub trait Presenter {
    /// Re-establishes both axis domains from the largest visible import value.
    ///
    /// The x axis plots exports but shares this bound with the y axis.
    fn draw_scales(&mut self, max_imports: f64) -> TradeResult<()>;

    /// Draws one legend entry per continent, in iteration order.
    fn draw_legend(&mut self, continents: &IndexSet<String>) -> TradeResult<()>;

    /// Reconciles the bubble set with `records`, keyed by country.
    fn draw_bubbles(&mut self, records: &[TradeRecord]) -> TradeResult<()>;

    /// Draws one bar per year in the given order.
    fn draw_year_bars(&mut self, bars: &[YearBar]) -> TradeResult<()>;

    /// Highlights the bar for `selected_year` and resets all others.
    fn highlight_selected_bar(&mut self, selected_year: i32) -> TradeResult<()>;

    /// Called when the session enters `Updating` before a redraw and again
    /// when it returns to `Idle`, including after a failed draw.
    fn phase_changed(&mut self, _phase: SessionPhase) {}
}
