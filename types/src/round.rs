//! Round identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential identity of a voting round.
///
/// The counter starts at [`RoundId::NONE`] (0) before any round exists; the
/// first successfully opened round is 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundId(u64);

impl RoundId {
    /// Sentinel meaning "no round has been opened yet".
    pub const NONE: Self = Self(0);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }

    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// The id following this one, or `None` on counter overflow.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
