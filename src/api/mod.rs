mod session;
mod view_config;
mod view_state;

pub use session::TradeSession;
pub use view_config::{DEFAULT_TRANSITION_DURATION_MS, REFERENCE_TOP_K, ViewConfig};
pub use view_state::{ViewSnapshot, ViewState};
