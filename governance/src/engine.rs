//! The voting engine. Composes rounds, ballots, custody and withdrawals
//! behind one set of atomic operations.
//!
//! Each state-changing method either commits fully and emits exactly one
//! [`VotingEvent`], or returns an error having changed nothing. Methods take
//! `&mut self`, so a single engine value is a single-writer boundary; wrap it
//! in [`crate::SharedVotingEngine`] to serve many threads.

use crate::ballot::{BallotLedger, BallotState, CastReceipt};
use crate::config::{default_journal_capacity, EngineConfig};
use crate::custody::CustodyGateway;
use crate::error::VotingError;
use crate::event::{EventBus, VotingEvent};
use crate::round::{Round, RoundManager};
use crate::snapshot::{EngineSnapshot, SNAPSHOT_VERSION};
use crate::weight::WeightEngine;
use crate::withdrawal::{WithdrawalController, WithdrawalReceipt};
use lockvote_ledger::{AccessGate, BalanceLedger};
use lockvote_types::{Amount, Choice, Clock, Identity, RoundId, Timestamp, VotingParams};
use lockvote_utils::format_duration;
use std::collections::VecDeque;
use tracing::{debug, info};

pub struct VotingEngine<L, G, C> {
    params: VotingParams,
    rounds: RoundManager,
    ballots: BallotLedger,
    withdrawals: WithdrawalController,
    weights: WeightEngine,
    custody: CustodyGateway<L>,
    gate: G,
    clock: C,
    bus: EventBus,
    journal: VecDeque<VotingEvent>,
    journal_capacity: usize,
}

impl<L, G, C> VotingEngine<L, G, C>
where
    L: BalanceLedger,
    G: AccessGate,
    C: Clock,
{
    /// Build an engine from a loaded configuration.
    pub fn new(config: &EngineConfig, ledger: L, gate: G, clock: C) -> Self {
        Self::with_params(config.params(), config.custody.clone(), ledger, gate, clock)
            .with_journal_capacity(config.journal_capacity)
    }

    pub fn with_params(params: VotingParams, custody: Identity, ledger: L, gate: G, clock: C) -> Self {
        Self {
            withdrawals: WithdrawalController::new(params.early_window_secs),
            params,
            rounds: RoundManager::new(),
            ballots: BallotLedger::new(),
            weights: WeightEngine,
            custody: CustodyGateway::new(ledger, custody),
            gate,
            clock,
            bus: EventBus::new(),
            journal: VecDeque::new(),
            journal_capacity: default_journal_capacity(),
        }
    }

    /// Keep at most `capacity` undrained events; zero turns the journal off.
    pub fn with_journal_capacity(mut self, capacity: usize) -> Self {
        self.journal_capacity = capacity;
        self.journal.truncate(capacity);
        self
    }

    // ── Operations ─────────────────────────────────────────────────────

    /// Open the next round over `[start, end)`. Only the authority may call this.
    pub fn open_round(
        &mut self,
        start: Timestamp,
        end: Timestamp,
        description: impl Into<String>,
        caller: &Identity,
    ) -> Result<RoundId, VotingError> {
        let now = self.clock.now();
        let round = self
            .rounds
            .open_round(
                start,
                end,
                description.into(),
                caller,
                &self.gate,
                now,
                self.params.round_policy,
            )
            .map_err(|e| rejected("open_round", caller, e))?
            .clone();

        info!(
            round = %round.id,
            start = %round.start,
            end = %round.end,
            "round opened ({})",
            format_duration(round.duration_secs())
        );
        self.commit(VotingEvent::RoundOpened {
            start: round.start,
            end: round.end,
            round: round.id,
            description: round.description,
        });
        Ok(round.id)
    }

    /// Lock `amount` of the caller's balance behind `choice` in the current round.
    pub fn cast_vote(
        &mut self,
        caller: &Identity,
        choice: Choice,
        amount: Amount,
    ) -> Result<CastReceipt, VotingError> {
        let now = self.clock.now();
        let receipt = self
            .ballots
            .cast_vote(&self.rounds, &self.custody, caller, choice, amount, now)
            .map_err(|e| rejected("cast_vote", caller, e))?;

        info!(
            round = %receipt.round,
            voter = %caller,
            %choice,
            %amount,
            weight = %receipt.weight,
            locked = %receipt.locked,
            "vote cast"
        );
        self.commit(VotingEvent::VoteCast {
            round: receipt.round,
            voter: caller.clone(),
            choice,
            weight: receipt.weight,
        });
        Ok(receipt)
    }

    /// Reclaim everything the caller has locked in `round`.
    pub fn request_withdrawal(
        &mut self,
        round: RoundId,
        caller: &Identity,
    ) -> Result<WithdrawalReceipt, VotingError> {
        let now = self.clock.now();
        let receipt = self
            .withdrawals
            .request_withdrawal(&self.rounds, &mut self.ballots, &self.custody, round, caller, now)
            .map_err(|e| rejected("request_withdrawal", caller, e))?;

        info!(
            %round,
            voter = %caller,
            amount = %receipt.amount,
            path = ?receipt.path,
            "withdrawal made"
        );
        self.commit(VotingEvent::WithdrawalMade {
            round,
            voter: caller.clone(),
            amount: receipt.amount,
        });
        Ok(receipt)
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Whether the current round accepts votes right now.
    pub fn is_open(&self) -> bool {
        self.rounds.is_open(self.clock.now())
    }

    /// The current round's window, `None` before the first round.
    pub fn current_window(&self) -> Option<&Round> {
        self.rounds.current_round()
    }

    pub fn current_round_id(&self) -> RoundId {
        self.rounds.current_id()
    }

    pub fn round(&self, id: RoundId) -> Option<&Round> {
        self.rounds.round(id)
    }

    pub fn tally(&self, round: RoundId, choice: Choice) -> Amount {
        self.ballots.tally(round, choice)
    }

    pub fn locked_amount(&self, round: RoundId, voter: &Identity) -> Amount {
        self.ballots.locked_amount(round, voter)
    }

    pub fn ballot_state(&self, round: RoundId, voter: &Identity) -> BallotState {
        self.ballots.ballot_state(round, voter)
    }

    /// Influence a lock of `amount` would contribute.
    pub fn weight_of(&self, amount: Amount) -> Amount {
        self.weights.weight(amount)
    }

    pub fn params(&self) -> &VotingParams {
        &self.params
    }

    pub fn custody(&self) -> &CustodyGateway<L> {
        &self.custody
    }

    // ── Notifications ──────────────────────────────────────────────────

    /// Register a listener invoked synchronously on every committed event.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&VotingEvent) + Send + Sync>) {
        self.bus.subscribe(listener);
    }

    /// Drain the events committed since the last call, oldest first. Only
    /// the most recent `journal_capacity` of them are retained.
    pub fn take_events(&mut self) -> Vec<VotingEvent> {
        self.journal.drain(..).collect()
    }

    // ── Persistence ────────────────────────────────────────────────────

    /// Serialize rounds, ballots and tallies.
    pub fn save_state(&self) -> Result<Vec<u8>, VotingError> {
        EngineSnapshot {
            version: SNAPSHOT_VERSION,
            rounds: self.rounds.clone(),
            ballots: self.ballots.clone(),
        }
        .encode()
    }

    /// Replace rounds, ballots and tallies with a saved snapshot. On error
    /// the engine is left as it was.
    pub fn load_state(&mut self, data: &[u8]) -> Result<(), VotingError> {
        let snapshot = EngineSnapshot::decode(data)?;
        self.rounds = snapshot.rounds;
        self.ballots = snapshot.ballots;
        info!(
            rounds = self.rounds.round_count(),
            current = %self.rounds.current_id(),
            "engine state restored"
        );
        Ok(())
    }

    fn commit(&mut self, event: VotingEvent) {
        if self.journal_capacity > 0 {
            if self.journal.len() == self.journal_capacity {
                self.journal.pop_front();
            }
            self.journal.push_back(event.clone());
        }
        self.bus.emit(&event);
    }
}

fn rejected(op: &'static str, caller: &Identity, err: VotingError) -> VotingError {
    debug!(op, caller = %caller, kind = ?err.kind(), "rejected: {err}");
    err
}
