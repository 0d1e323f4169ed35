//! Per-round ballots, locked amounts and weighted tallies.
//!
//! A ballot is keyed by (round, voter). While its locked amount is positive
//! the recorded choice is fixed; the only way to switch sides is to withdraw
//! first. Tallies are running sums of the influence each cast contributed.

use crate::custody::CustodyGateway;
use crate::error::{ResourceError, StateError, VotingError};
use crate::round::RoundManager;
use crate::weight::weight;
use lockvote_ledger::BalanceLedger;
use lockvote_types::{Amount, Choice, Identity, RoundId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A voter's position in one round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterBallot {
    /// `None` once the ballot has been zeroed by a withdrawal.
    pub choice: Option<Choice>,
    /// Balance currently held in custody for this ballot.
    pub amount: Amount,
    /// Influence this ballot has added to the tally since it was last zeroed.
    pub contributed: Amount,
    /// Set on the first successful cast, never cleared.
    pub ever_locked: bool,
}

/// Withdrawal state machine view of a ballot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BallotState {
    /// Never voted in this round.
    NoBallot,
    /// Balance is in custody behind `choice`.
    Locked { amount: Amount, choice: Choice },
    /// Voted before, everything has been returned.
    Withdrawn,
}

/// Outcome of a committed cast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastReceipt {
    pub round: RoundId,
    pub choice: Choice,
    /// Influence added by this cast.
    pub weight: Amount,
    /// Total locked for the voter in this round after the cast.
    pub locked: Amount,
    /// Tally for `choice` after the cast.
    pub tally: Amount,
}

/// A withdrawal that has been validated but not yet applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingRelease {
    pub amount: Amount,
    /// Tally value to store for the ballot's choice, when the withdrawal
    /// reverses its contribution.
    pub unwound_tally: Option<(Choice, Amount)>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BallotLedger {
    ballots: HashMap<(RoundId, Identity), VoterBallot>,
    tallies: HashMap<(RoundId, Choice), Amount>,
}

impl BallotLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock `amount` behind `choice` in the current round.
    ///
    /// All checks and arithmetic happen before custody is touched, and no
    /// ballot or tally is written unless the custody transfer succeeds.
    pub fn cast_vote<L: BalanceLedger>(
        &mut self,
        rounds: &RoundManager,
        custody: &CustodyGateway<L>,
        caller: &Identity,
        choice: Choice,
        amount: Amount,
        now: Timestamp,
    ) -> Result<CastReceipt, VotingError> {
        let round = rounds.current_id();
        if !rounds.is_open(now) {
            return Err(StateError::RoundClosed { round }.into());
        }
        if amount.is_zero() {
            return Err(ResourceError::ZeroAmount.into());
        }
        if caller == custody.custody_identity() {
            return Err(ResourceError::CustodyAccount {
                account: caller.clone(),
            }
            .into());
        }
        let available = custody.balance_of(caller)?;
        if available < amount {
            return Err(ResourceError::InsufficientBalance {
                needed: amount,
                available,
            }
            .into());
        }

        let key = (round, caller.clone());
        let existing = self.ballots.get(&key).cloned().unwrap_or_default();
        if let Some(recorded) = existing.choice.filter(|_| !existing.amount.is_zero()) {
            if recorded != choice {
                return Err(StateError::ConflictingChoice {
                    recorded,
                    requested: choice,
                }
                .into());
            }
        }

        let influence = weight(amount);
        let locked = existing
            .amount
            .checked_add(amount)
            .ok_or(ResourceError::Overflow)?;
        let contributed = existing
            .contributed
            .checked_add(influence)
            .ok_or(ResourceError::Overflow)?;
        let tally = self
            .tally(round, choice)
            .checked_add(influence)
            .ok_or(ResourceError::Overflow)?;

        custody.lock(caller, amount)?;

        self.ballots.insert(
            key,
            VoterBallot {
                choice: Some(choice),
                amount: locked,
                contributed,
                ever_locked: true,
            },
        );
        self.tallies.insert((round, choice), tally);

        Ok(CastReceipt {
            round,
            choice,
            weight: influence,
            locked,
            tally,
        })
    }

    /// Balance `voter` currently has locked in `round`.
    pub fn locked_amount(&self, round: RoundId, voter: &Identity) -> Amount {
        self.ballot(round, voter)
            .map(|b| b.amount)
            .unwrap_or(Amount::ZERO)
    }

    /// Weighted tally for `choice` in `round`.
    pub fn tally(&self, round: RoundId, choice: Choice) -> Amount {
        self.tallies
            .get(&(round, choice))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    pub fn ballot(&self, round: RoundId, voter: &Identity) -> Option<&VoterBallot> {
        self.ballots.get(&(round, voter.clone()))
    }

    pub fn ballot_state(&self, round: RoundId, voter: &Identity) -> BallotState {
        match self.ballot(round, voter) {
            None => BallotState::NoBallot,
            Some(b) => match b.choice {
                Some(choice) if !b.amount.is_zero() => BallotState::Locked {
                    amount: b.amount,
                    choice,
                },
                _ if b.ever_locked => BallotState::Withdrawn,
                _ => BallotState::NoBallot,
            },
        }
    }

    /// Validate a withdrawal of everything `voter` has locked in `round`.
    ///
    /// With `unwind` set, the ballot's recorded contribution is taken back
    /// out of the tally as well.
    pub(crate) fn plan_release(
        &self,
        round: RoundId,
        voter: &Identity,
        unwind: bool,
    ) -> Result<PendingRelease, VotingError> {
        let ballot = self
            .ballot(round, voter)
            .filter(|b| !b.amount.is_zero())
            .ok_or_else(|| VotingError::EmptyClaim {
                round,
                voter: voter.clone(),
            })?;

        let unwound_tally = match (unwind, ballot.choice) {
            (true, Some(choice)) => {
                let reduced = self
                    .tally(round, choice)
                    .checked_sub(ballot.contributed)
                    .ok_or(ResourceError::Overflow)?;
                Some((choice, reduced))
            }
            _ => None,
        };

        Ok(PendingRelease {
            amount: ballot.amount,
            unwound_tally,
        })
    }

    /// Apply a release produced by [`BallotLedger::plan_release`]. The ballot
    /// is zeroed, not removed.
    pub(crate) fn apply_release(&mut self, round: RoundId, voter: &Identity, release: &PendingRelease) {
        if let Some(ballot) = self.ballots.get_mut(&(round, voter.clone())) {
            ballot.amount = Amount::ZERO;
            ballot.contributed = Amount::ZERO;
            ballot.choice = None;
        }
        if let Some((choice, tally)) = release.unwound_tally {
            self.tallies.insert((round, choice), tally);
        }
    }
}
