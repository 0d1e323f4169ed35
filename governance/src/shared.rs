//! Thread-safe handle serializing every operation through one engine.

use crate::ballot::{BallotState, CastReceipt};
use crate::engine::VotingEngine;
use crate::error::VotingError;
use crate::event::VotingEvent;
use crate::round::Round;
use crate::withdrawal::WithdrawalReceipt;
use lockvote_ledger::{AccessGate, BalanceLedger};
use lockvote_types::{Amount, Choice, Clock, Identity, RoundId, Timestamp};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle to a [`VotingEngine`] behind a mutex.
///
/// Each call holds the lock for the whole operation, so concurrent callers
/// never observe a partially applied cast or withdrawal.
pub struct SharedVotingEngine<L, G, C> {
    inner: Arc<Mutex<VotingEngine<L, G, C>>>,
}

impl<L, G, C> Clone for SharedVotingEngine<L, G, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L, G, C> SharedVotingEngine<L, G, C>
where
    L: BalanceLedger,
    G: AccessGate,
    C: Clock,
{
    pub fn new(engine: VotingEngine<L, G, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    // Poison is recovered: state is fully written before listeners run.
    fn lock(&self) -> MutexGuard<'_, VotingEngine<L, G, C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn open_round(
        &self,
        start: Timestamp,
        end: Timestamp,
        description: impl Into<String>,
        caller: &Identity,
    ) -> Result<RoundId, VotingError> {
        self.lock().open_round(start, end, description, caller)
    }

    pub fn cast_vote(
        &self,
        caller: &Identity,
        choice: Choice,
        amount: Amount,
    ) -> Result<CastReceipt, VotingError> {
        self.lock().cast_vote(caller, choice, amount)
    }

    pub fn request_withdrawal(
        &self,
        round: RoundId,
        caller: &Identity,
    ) -> Result<WithdrawalReceipt, VotingError> {
        self.lock().request_withdrawal(round, caller)
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_open()
    }

    pub fn current_window(&self) -> Option<Round> {
        self.lock().current_window().cloned()
    }

    pub fn tally(&self, round: RoundId, choice: Choice) -> Amount {
        self.lock().tally(round, choice)
    }

    pub fn locked_amount(&self, round: RoundId, voter: &Identity) -> Amount {
        self.lock().locked_amount(round, voter)
    }

    pub fn ballot_state(&self, round: RoundId, voter: &Identity) -> BallotState {
        self.lock().ballot_state(round, voter)
    }

    pub fn take_events(&self) -> Vec<VotingEvent> {
        self.lock().take_events()
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut VotingEngine<L, G, C>) -> R) -> R {
        f(&mut self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use lockvote_nullables::{NullAccessGate, NullClock, NullLedger};
    use std::thread;

    #[test]
    fn concurrent_casts_are_serialized() {
        let voters: Vec<Identity> = (0..8).map(|i| Identity::new(format!("v{i}"))).collect();
        let ledger = voters
            .iter()
            .fold(NullLedger::new(), |l, v| l.with_balance(v, 10_000));
        let clock = Arc::new(NullClock::new(1_000));
        let shared = SharedVotingEngine::new(VotingEngine::new(
            &EngineConfig::default(),
            Arc::new(ledger),
            NullAccessGate::with_authority(&Identity::new("owner")),
            Arc::clone(&clock),
        ));
        let round = shared
            .open_round(
                Timestamp::new(1_010),
                Timestamp::new(90_000),
                "load",
                &Identity::new("owner"),
            )
            .unwrap();
        clock.set(2_000);

        let handles: Vec<_> = voters
            .iter()
            .cloned()
            .map(|voter| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..10 {
                        shared.cast_vote(&voter, Choice::Yes, Amount::new(100)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.tally(round, Choice::Yes), Amount::new(8 * 10 * 100));
        for voter in &voters {
            assert_eq!(shared.locked_amount(round, voter), Amount::new(1_000));
        }
        assert_eq!(shared.take_events().len(), 1 + 80);
        let held = shared.with(|engine| engine.custody().held().unwrap());
        assert_eq!(held, Amount::new(8_000));
    }
}
