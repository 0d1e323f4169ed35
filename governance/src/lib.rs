//! Round-based governance voting backed by custodied balance.
//!
//! Participants lock ledger balance behind a yes/no choice in the current
//! round. Influence is dampened for large holdings (see [`weight()`]), and
//! locked balance comes back through a withdrawal policy tied to the round
//! window:
//!
//! - Before the blackout: early unwind, tally contribution reversed.
//! - Inside `[end - early_window, end)`: withdrawals refused.
//! - After the round ends (or once it is superseded): balance returned,
//!   results frozen.
//!
//! Balances, access control and time are external collaborators injected
//! through the traits in `lockvote-ledger` and `lockvote-types`.

pub mod ballot;
pub mod config;
pub mod custody;
pub mod engine;
pub mod error;
pub mod event;
pub mod round;
pub mod shared;
pub mod snapshot;
pub mod weight;
pub mod withdrawal;

pub use ballot::{BallotLedger, BallotState, CastReceipt, VoterBallot};
pub use config::EngineConfig;
pub use custody::CustodyGateway;
pub use engine::VotingEngine;
pub use error::{ErrorKind, ResourceError, RoundConfigError, StateError, VotingError};
pub use event::{EventBus, VotingEvent};
pub use round::{Round, RoundManager};
pub use shared::SharedVotingEngine;
pub use snapshot::EngineSnapshot;
pub use weight::{weight, WeightEngine, WeightTier};
pub use withdrawal::{WithdrawalController, WithdrawalPath, WithdrawalReceipt};
