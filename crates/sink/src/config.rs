//! Log sink configuration.

use serde::{Deserialize, Serialize};
use trigger_core::limits::DEFAULT_LOG_FILE;

/// Trigger log sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Path to the trigger log file, one JSON object per line
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
        }
    }
}
