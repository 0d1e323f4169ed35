use lockvote_types::Identity;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient funds in {account}: need {needed}, have {available}")]
    InsufficientFunds {
        account: Identity,
        needed: u128,
        available: u128,
    },

    #[error("transfer rejected: {0}")]
    Rejected(String),

    #[error("ledger backend error: {0}")]
    Backend(String),
}
