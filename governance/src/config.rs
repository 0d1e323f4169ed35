//! Engine configuration with TOML file support.

use crate::error::VotingError;
use lockvote_types::params::DEFAULT_EARLY_WINDOW_SECS;
use lockvote_types::{Identity, RoundPolicy, VotingParams};
use lockvote_utils::{LogFormat, LoggingError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a voting engine.
///
/// Can be loaded from a TOML file via [`EngineConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seconds before a round's end during which withdrawals are refused.
    #[serde(default = "default_early_window_secs")]
    pub early_window_secs: u64,

    /// Whether a new round may open while the previous one is live.
    #[serde(default)]
    pub round_policy: RoundPolicy,

    /// Ledger identity that holds locked balance.
    #[serde(default = "default_custody")]
    pub custody: Identity,

    /// Most recent events kept for `take_events`; older ones are dropped.
    /// Zero disables the journal, leaving subscribers as the only consumers.
    #[serde(default = "default_journal_capacity")]
    pub journal_capacity: usize,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_early_window_secs() -> u64 {
    DEFAULT_EARLY_WINDOW_SECS
}

fn default_custody() -> Identity {
    Identity::new("custody")
}

pub(crate) fn default_journal_capacity() -> usize {
    1_024
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, VotingError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| VotingError::Settings(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, VotingError> {
        toml::from_str(s).map_err(|e| VotingError::Settings(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, VotingError> {
        toml::to_string_pretty(self).map_err(|e| VotingError::Settings(e.to_string()))
    }

    /// The run-time parameters the engine consults.
    pub fn params(&self) -> VotingParams {
        VotingParams {
            early_window_secs: self.early_window_secs,
            round_policy: self.round_policy,
        }
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> Result<(), LoggingError> {
        lockvote_utils::init_logging(self.log_format, &self.log_level)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            early_window_secs: default_early_window_secs(),
            round_policy: RoundPolicy::default(),
            custody: default_custody(),
            journal_capacity: default_journal_capacity(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
