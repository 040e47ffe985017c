use serde::{Deserialize, Serialize};

/// Update phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No update in flight.
    Idle,
    /// View recomputation and redraw in progress.
    Updating,
}

/// Messages the rendering layer routes back into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// A year bar was clicked.
    YearSelected { year: i32 },
}

impl ViewEvent {
    #[must_use]
    pub fn year_selected(year: i32) -> Self {
        Self::YearSelected { year }
    }
}
