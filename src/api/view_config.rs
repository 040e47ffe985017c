use serde::{Deserialize, Serialize};

use crate::error::{TradeError, TradeResult};

/// Reference transition length for animated year changes.
pub const DEFAULT_TRANSITION_DURATION_MS: u64 = 1250;

/// Truncation limit used by the reference chart.
pub const REFERENCE_TOP_K: usize = 40;

/// Public session bootstrap configuration.
///
/// Serializable so hosts can persist chart setup next to their data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Initial year; the latest year in the data when unset.
    #[serde(default)]
    pub default_year: Option<i32>,
    /// Maximum number of visible records per year; unlimited when unset.
    #[serde(default)]
    pub top_k: Option<usize>,
    /// Transition length in milliseconds. `0` disables animation.
    #[serde(default = "default_transition_duration_ms")]
    pub transition_duration_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_year: None,
            top_k: None,
            transition_duration_ms: DEFAULT_TRANSITION_DURATION_MS,
        }
    }
}

impl ViewConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON config; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> TradeResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            TradeError::InvalidConfig(format!("failed to parse view config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> TradeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TradeError::InvalidConfig(format!("failed to serialize view config: {e}"))
        })
    }

    #[must_use]
    pub fn with_default_year(mut self, year: i32) -> Self {
        self.default_year = Some(year);
        self
    }

    #[must_use]
    pub fn with_top_k(mut self, top_k: Option<usize>) -> Self {
        self.top_k = top_k;
        self
    }

    #[must_use]
    pub fn with_transition_duration_ms(mut self, duration_ms: u64) -> Self {
        self.transition_duration_ms = duration_ms;
        self
    }

    /// Static variant: every redraw applies immediately.
    #[must_use]
    pub fn without_animation(self) -> Self {
        self.with_transition_duration_ms(0)
    }

    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.transition_duration_ms > 0
    }

    pub fn validate(&self) -> TradeResult<()> {
        if self.top_k == Some(0) {
            return Err(TradeError::InvalidConfig(
                "top_k must be > 0 when set".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_transition_duration_ms() -> u64 {
    DEFAULT_TRANSITION_DURATION_MS
}
