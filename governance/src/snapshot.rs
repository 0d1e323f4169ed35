//! Serializable snapshot of engine state for host-side persistence.

use crate::ballot::BallotLedger;
use crate::error::VotingError;
use crate::round::RoundManager;
use serde::{Deserialize, Serialize};

/// Current snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Rounds, ballots and tallies, exactly as the engine holds them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub version: u32,
    pub rounds: RoundManager,
    pub ballots: BallotLedger,
}

impl EngineSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>, VotingError> {
        bincode::serialize(self).map_err(|e| VotingError::Serialization(e.to_string()))
    }

    pub fn decode(data: &[u8]) -> Result<Self, VotingError> {
        let snapshot: Self =
            bincode::deserialize(data).map_err(|e| VotingError::Serialization(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(VotingError::Serialization(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            )));
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage_and_unknown_versions() {
        assert!(matches!(
            EngineSnapshot::decode(&[0xFF, 0x01]),
            Err(VotingError::Serialization(_))
        ));
        let future = EngineSnapshot {
            version: SNAPSHOT_VERSION + 1,
            rounds: RoundManager::new(),
            ballots: BallotLedger::new(),
        };
        let bytes = future.encode().unwrap();
        let err = EngineSnapshot::decode(&bytes).unwrap_err();
        assert!(err.to_string().contains("unsupported snapshot version"));
    }
}
