//! Structured error taxonomy for every engine operation.
//!
//! Every error leaves engine state untouched; a caller may retry once the
//! violated condition has been corrected.

use lockvote_types::{Amount, Choice, Identity, RoundId, Timestamp};
use thiserror::Error;

/// Coarse category of a [`VotingError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authorization,
    Configuration,
    State,
    Resource,
    EmptyClaim,
    Settings,
    Serialization,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VotingError {
    #[error("{caller} is not authorised to open rounds")]
    Unauthorized { caller: Identity },

    #[error("invalid round window: {0}")]
    Configuration(#[from] RoundConfigError),

    #[error("{0}")]
    State(#[from] StateError),

    #[error("{0}")]
    Resource(#[from] ResourceError),

    #[error("nothing to withdraw for {voter} in round {round}")]
    EmptyClaim { round: RoundId, voter: Identity },

    #[error("config error: {0}")]
    Settings(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl VotingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::State(_) => ErrorKind::State,
            Self::Resource(_) => ErrorKind::Resource,
            Self::EmptyClaim { .. } => ErrorKind::EmptyClaim,
            Self::Settings(_) => ErrorKind::Settings,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }
}

/// Why a requested round window was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoundConfigError {
    #[error("start and end must both be non-zero")]
    ZeroTimestamp,

    #[error("start {start} is not after the current time {now}")]
    StartNotInFuture { start: Timestamp, now: Timestamp },

    #[error("start {start} is not before end {end}")]
    EmptyWindow { start: Timestamp, end: Timestamp },

    #[error("round {round} is still live until {ends_at}")]
    PreviousRoundLive { round: RoundId, ends_at: Timestamp },
}

/// Operation not permitted in the current round / ballot state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("round {round} is closed")]
    RoundClosed { round: RoundId },

    #[error("conflicting choice: {recorded} is locked, {requested} requested")]
    ConflictingChoice { recorded: Choice, requested: Choice },

    #[error("election not finished: round {round} withdrawals blocked until {ends_at}")]
    WithdrawalBlackout { round: RoundId, ends_at: Timestamp },
}

/// Balance and custody failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("{account} holds locked balance and cannot vote")]
    CustodyAccount { account: Identity },

    #[error("transfer failed: {0}")]
    TransferFailed(String),

    #[error("balance ledger unavailable: {0}")]
    LedgerUnavailable(String),

    #[error("arithmetic overflow")]
    Overflow,
}
