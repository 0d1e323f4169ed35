//! Boundary to the external balance ledger.
//!
//! Custody is itself a ledger identity. Locking a vote moves balance from the
//! voter to that identity; withdrawing moves it back. Ledger failures are
//! surfaced as [`ResourceError`]s and never retried here.

use crate::error::ResourceError;
use lockvote_ledger::{BalanceLedger, LedgerError};
use lockvote_types::{Amount, Identity};

pub struct CustodyGateway<L> {
    ledger: L,
    custody: Identity,
}

impl<L: BalanceLedger> CustodyGateway<L> {
    pub fn new(ledger: L, custody: Identity) -> Self {
        Self { ledger, custody }
    }

    /// The ledger identity that holds locked balance.
    pub fn custody_identity(&self) -> &Identity {
        &self.custody
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Balance the ledger reports for `account` right now.
    pub fn balance_of(&self, account: &Identity) -> Result<Amount, ResourceError> {
        self.ledger
            .balance_of(account)
            .map_err(|e| ResourceError::LedgerUnavailable(e.to_string()))
    }

    /// Total balance currently held in custody.
    pub fn held(&self) -> Result<Amount, ResourceError> {
        self.balance_of(&self.custody)
    }

    /// Move `amount` from `owner` into custody.
    pub fn lock(&self, owner: &Identity, amount: Amount) -> Result<(), ResourceError> {
        self.ledger
            .transfer(owner, &self.custody, amount)
            .map_err(|e| transfer_failed(owner, amount, e))
    }

    /// Return `amount` from custody to `owner`.
    pub fn release(&self, owner: &Identity, amount: Amount) -> Result<(), ResourceError> {
        self.ledger
            .transfer(&self.custody, owner, amount)
            .map_err(|e| transfer_failed(owner, amount, e))
    }
}

fn transfer_failed(owner: &Identity, amount: Amount, err: LedgerError) -> ResourceError {
    tracing::warn!(owner = %owner, amount = %amount, "custody transfer failed: {err}");
    ResourceError::TransferFailed(err.to_string())
}
