use serde::{Deserialize, Serialize};

use crate::signal::Signal;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorConfig {
    /// Ticks to run before `postfire` reports the run as finished. Zero means
    /// no limit.
    #[serde(default)]
    pub iterations: u64,
    #[serde(default = "default_max_rounds_per_tick")]
    pub max_rounds_per_tick: usize,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            iterations: 0,
            max_rounds_per_tick: default_max_rounds_per_tick(),
        }
    }
}

fn default_max_rounds_per_tick() -> usize {
    1_024
}

/// What one call to [`crate::director::FixedPointDirector::iterate`] produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub rounds: usize,
    pub firings: usize,
    pub outputs: Vec<(String, Signal)>,
    pub proceed: bool,
}
