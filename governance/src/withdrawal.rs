//! Reclaiming locked balance.
//!
//! Which path a withdrawal takes depends on where `now` falls relative to
//! the round's window:
//!
//! ```text
//!   current round:  ... early unwind ...|... blackout ...|  settled
//!                                 end - early_window     end
//!   past round:     settled
//! ```
//!
//! Only the early unwind touches the tally; once a round has ended its
//! results are frozen and withdrawals just return custody.

use crate::ballot::BallotLedger;
use crate::custody::CustodyGateway;
use crate::error::{StateError, VotingError};
use crate::round::RoundManager;
use lockvote_ledger::BalanceLedger;
use lockvote_types::{Amount, Identity, RoundId, Timestamp};

/// How a withdrawal request against a round is handled at a given time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WithdrawalPath {
    /// Live round, before the blackout: return custody and reverse the tally.
    EarlyUnwind,
    /// Live round, inside `[end - early_window, end)`: refused.
    Blackout { ends_at: Timestamp },
    /// Past round, or the current round has ended: return custody only.
    Settled,
}

/// Outcome of a committed withdrawal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawalReceipt {
    pub round: RoundId,
    pub amount: Amount,
    pub path: WithdrawalPath,
}

#[derive(Clone, Copy, Debug)]
pub struct WithdrawalController {
    early_window_secs: u64,
}

impl WithdrawalController {
    pub fn new(early_window_secs: u64) -> Self {
        Self { early_window_secs }
    }

    pub fn early_window_secs(&self) -> u64 {
        self.early_window_secs
    }

    /// Decide which path a withdrawal against `round` takes at `now`.
    pub fn classify(&self, rounds: &RoundManager, round: RoundId, now: Timestamp) -> WithdrawalPath {
        let Some(current) = rounds.current_round().filter(|r| r.id == round) else {
            return WithdrawalPath::Settled;
        };
        if current.has_ended(now) {
            return WithdrawalPath::Settled;
        }
        let blackout_from = current.end.saturating_sub(self.early_window_secs);
        if now < blackout_from {
            WithdrawalPath::EarlyUnwind
        } else {
            WithdrawalPath::Blackout {
                ends_at: current.end,
            }
        }
    }

    /// Return everything `caller` has locked in `round`.
    ///
    /// Fails with [`StateError::WithdrawalBlackout`] inside the blackout
    /// window whatever the locked amount, and with
    /// [`VotingError::EmptyClaim`] when nothing is locked (never voted, or
    /// already withdrawn). A custody failure aborts with no state change.
    pub fn request_withdrawal<L: BalanceLedger>(
        &self,
        rounds: &RoundManager,
        ballots: &mut BallotLedger,
        custody: &CustodyGateway<L>,
        round: RoundId,
        caller: &Identity,
        now: Timestamp,
    ) -> Result<WithdrawalReceipt, VotingError> {
        let path = self.classify(rounds, round, now);
        let unwind = match path {
            WithdrawalPath::Blackout { ends_at } => {
                return Err(StateError::WithdrawalBlackout { round, ends_at }.into());
            }
            WithdrawalPath::EarlyUnwind => true,
            WithdrawalPath::Settled => false,
        };

        let release = ballots.plan_release(round, caller, unwind)?;
        custody.release(caller, release.amount)?;
        ballots.apply_release(round, caller, &release);

        Ok(WithdrawalReceipt {
            round,
            amount: release.amount,
            path,
        })
    }
}

impl Default for WithdrawalController {
    fn default() -> Self {
        Self::new(lockvote_types::params::DEFAULT_EARLY_WINDOW_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResourceError;
    use lockvote_ledger::SingleAuthority;
    use lockvote_nullables::NullLedger;
    use lockvote_types::{Choice, RoundPolicy};

    const START: u64 = 10_000;
    const END: u64 = 20_000;
    const WINDOW: u64 = 1_800;

    fn id(name: &str) -> Identity {
        Identity::new(name)
    }

    struct Fixture {
        rounds: RoundManager,
        ballots: BallotLedger,
        custody: CustodyGateway<NullLedger>,
        controller: WithdrawalController,
    }

    fn fixture() -> Fixture {
        let mut rounds = RoundManager::new();
        rounds
            .open_round(
                Timestamp::new(START),
                Timestamp::new(END),
                "r".into(),
                &id("owner"),
                &SingleAuthority::new(id("owner")),
                Timestamp::new(1),
                RoundPolicy::Sequential,
            )
            .unwrap();
        let mut f = Fixture {
            rounds,
            ballots: BallotLedger::new(),
            custody: CustodyGateway::new(
                NullLedger::new().with_balance(&id("alice"), 1_000_000),
                id("custody"),
            ),
            controller: WithdrawalController::new(WINDOW),
        };
        f.ballots
            .cast_vote(
                &f.rounds,
                &f.custody,
                &id("alice"),
                Choice::Yes,
                Amount::new(2_000),
                Timestamp::new(START),
            )
            .unwrap();
        f
    }

    impl Fixture {
        fn withdraw(&mut self, at: u64) -> Result<WithdrawalReceipt, VotingError> {
            self.controller.request_withdrawal(
                &self.rounds,
                &mut self.ballots,
                &self.custody,
                RoundId::new(1),
                &id("alice"),
                Timestamp::new(at),
            )
        }
    }

    #[test]
    fn classify_covers_every_interval() {
        let f = fixture();
        let round = RoundId::new(1);
        let at = |t| f.controller.classify(&f.rounds, round, Timestamp::new(t));
        assert_eq!(at(START - 1), WithdrawalPath::EarlyUnwind);
        assert_eq!(at(END - WINDOW - 1), WithdrawalPath::EarlyUnwind);
        let blackout = WithdrawalPath::Blackout {
            ends_at: Timestamp::new(END),
        };
        assert_eq!(at(END - WINDOW), blackout);
        assert_eq!(at(END - 1), blackout);
        assert_eq!(at(END), WithdrawalPath::Settled);
        assert_eq!(
            f.controller.classify(&f.rounds, RoundId::new(7), Timestamp::new(START)),
            WithdrawalPath::Settled
        );
    }

    #[test]
    fn early_unwind_reverses_tally() {
        let mut f = fixture();
        assert_eq!(f.ballots.tally(RoundId::new(1), Choice::Yes), Amount::new(200));
        let receipt = f.withdraw(START + 1).unwrap();
        assert_eq!(receipt.amount, Amount::new(2_000));
        assert_eq!(receipt.path, WithdrawalPath::EarlyUnwind);
        assert_eq!(f.ballots.tally(RoundId::new(1), Choice::Yes), Amount::ZERO);
        assert_eq!(f.custody.balance_of(&id("alice")).unwrap(), Amount::new(1_000_000));
    }

    #[test]
    fn blackout_refuses_regardless_of_amount() {
        let mut f = fixture();
        let err = f.withdraw(END - 1).unwrap_err();
        assert_eq!(
            err,
            VotingError::State(StateError::WithdrawalBlackout {
                round: RoundId::new(1),
                ends_at: Timestamp::new(END),
            })
        );
        assert_eq!(f.ballots.locked_amount(RoundId::new(1), &id("alice")), Amount::new(2_000));
        // A voter with nothing locked is refused the same way.
        let err = f
            .controller
            .request_withdrawal(
                &f.rounds,
                &mut f.ballots,
                &f.custody,
                RoundId::new(1),
                &id("nobody"),
                Timestamp::new(END - WINDOW),
            )
            .unwrap_err();
        assert!(matches!(err, VotingError::State(StateError::WithdrawalBlackout { .. })));
    }

    #[test]
    fn settled_withdrawal_keeps_tally_frozen() {
        let mut f = fixture();
        let receipt = f.withdraw(END).unwrap();
        assert_eq!(receipt.path, WithdrawalPath::Settled);
        assert_eq!(f.ballots.tally(RoundId::new(1), Choice::Yes), Amount::new(200));
        assert_eq!(f.ballots.locked_amount(RoundId::new(1), &id("alice")), Amount::ZERO);
    }

    #[test]
    fn repeat_withdrawal_is_empty_claim() {
        let mut f = fixture();
        f.withdraw(END + 5).unwrap();
        let err = f.withdraw(END + 6).unwrap_err();
        assert!(matches!(err, VotingError::EmptyClaim { .. }));
        assert_eq!(f.ballots.locked_amount(RoundId::new(1), &id("alice")), Amount::ZERO);
    }

    #[test]
    fn custody_failure_leaves_ballot_locked() {
        let mut f = fixture();
        f.custody.ledger().fail_transfers(true);
        let err = f.withdraw(START + 1).unwrap_err();
        assert!(matches!(err, VotingError::Resource(ResourceError::TransferFailed(_))));
        assert_eq!(f.ballots.locked_amount(RoundId::new(1), &id("alice")), Amount::new(2_000));
        assert_eq!(f.ballots.tally(RoundId::new(1), Choice::Yes), Amount::new(200));
    }

    #[test]
    fn window_longer_than_round_is_all_blackout() {
        let f = fixture();
        let wide = WithdrawalController::new(END);
        assert!(matches!(
            wide.classify(&f.rounds, RoundId::new(1), Timestamp::new(START)),
            WithdrawalPath::Blackout { .. }
        ));
    }
}
