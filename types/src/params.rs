//! Run-time parameters consulted by the voting engine.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default length of the withdrawal blackout before a round ends: 30 minutes.
pub const DEFAULT_EARLY_WINDOW_SECS: u64 = 30 * 60;

/// Whether a new round may be opened while the previous one is still live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPolicy {
    /// A new round may only open once the previous round's end time has passed.
    #[default]
    Sequential,
    /// A new round supersedes the previous one even if it is still live.
    Overlapping,
}

impl RoundPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Overlapping => "overlapping",
        }
    }
}

impl fmt::Display for RoundPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundPolicy {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(Self::Sequential),
            "overlapping" => Ok(Self::Overlapping),
            other => Err(TypesError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Engine parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingParams {
    /// Length (seconds) of the interval `[end - early_window, end)` in which
    /// withdrawals against the live round are refused. Before that interval a
    /// withdrawal unwinds the tally contribution.
    pub early_window_secs: u64,

    /// Round-creation policy.
    pub round_policy: RoundPolicy,
}

impl Default for VotingParams {
    fn default() -> Self {
        Self {
            early_window_secs: DEFAULT_EARLY_WINDOW_SECS,
            round_policy: RoundPolicy::Sequential,
        }
    }
}
