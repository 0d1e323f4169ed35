//! Round identity, windows and the round-creation policy.

use crate::error::{ResourceError, RoundConfigError, VotingError};
use lockvote_ledger::AccessGate;
use lockvote_types::{Identity, RoundId, RoundPolicy, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One voting cycle. Immutable once opened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    /// First second in which votes are accepted.
    pub start: Timestamp,
    /// First second in which votes are no longer accepted.
    pub end: Timestamp,
    pub description: String,
}

impl Round {
    /// `start <= now < end`.
    pub fn is_open(&self, now: Timestamp) -> bool {
        self.start <= now && now < self.end
    }

    /// Whether the window has fully elapsed.
    pub fn has_ended(&self, now: Timestamp) -> bool {
        now >= self.end
    }

    pub fn duration_secs(&self) -> u64 {
        self.end.as_secs().saturating_sub(self.start.as_secs())
    }
}

/// Owns every round ever opened and knows which one is current.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoundManager {
    rounds: BTreeMap<RoundId, Round>,
    current: RoundId,
}

impl RoundManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a requested window against `now` and the creation policy.
    ///
    /// Checks run in a fixed order so the reported error is deterministic:
    /// zero timestamps, start in the past, empty window, then the policy.
    pub fn validate_window(
        &self,
        start: Timestamp,
        end: Timestamp,
        now: Timestamp,
        policy: RoundPolicy,
    ) -> Result<(), RoundConfigError> {
        if start.is_epoch() || end.is_epoch() {
            return Err(RoundConfigError::ZeroTimestamp);
        }
        if start <= now {
            return Err(RoundConfigError::StartNotInFuture { start, now });
        }
        if start >= end {
            return Err(RoundConfigError::EmptyWindow { start, end });
        }
        if policy == RoundPolicy::Sequential {
            if let Some(live) = self.current_round().filter(|r| !r.has_ended(now)) {
                return Err(RoundConfigError::PreviousRoundLive {
                    round: live.id,
                    ends_at: live.end,
                });
            }
        }
        Ok(())
    }

    /// Open the next round.
    ///
    /// Fails with [`VotingError::Unauthorized`] before any window validation
    /// if `caller` is not recognised by `gate`.
    #[allow(clippy::too_many_arguments)]
    pub fn open_round<G: AccessGate + ?Sized>(
        &mut self,
        start: Timestamp,
        end: Timestamp,
        description: String,
        caller: &Identity,
        gate: &G,
        now: Timestamp,
        policy: RoundPolicy,
    ) -> Result<&Round, VotingError> {
        if !gate.is_authority(caller) {
            return Err(VotingError::Unauthorized {
                caller: caller.clone(),
            });
        }
        self.validate_window(start, end, now, policy)?;
        let id = self
            .current
            .next()
            .ok_or(ResourceError::Overflow)?;
        self.current = id;
        let round = self.rounds.entry(id).or_insert(Round {
            id,
            start,
            end,
            description,
        });
        Ok(&*round)
    }

    /// Whether the current round accepts votes at `now`. False before any
    /// round has been opened.
    pub fn is_open(&self, now: Timestamp) -> bool {
        self.current_round().is_some_and(|r| r.is_open(now))
    }

    /// Id of the current round, [`RoundId::NONE`] before the first one.
    pub fn current_id(&self) -> RoundId {
        self.current
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.get(&self.current)
    }

    pub fn is_current(&self, id: RoundId) -> bool {
        !id.is_none() && id == self.current
    }

    /// Any round ever opened, current or past.
    pub fn round(&self, id: RoundId) -> Option<&Round> {
        self.rounds.get(&id)
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }
}
