//! The external fungible balance ledger.

use crate::error::LedgerError;
use lockvote_types::{Amount, Identity};
use std::sync::Arc;

/// Balance ledger the engine moves custody through.
///
/// The ledger exclusively owns balances. The engine only asks for a balance
/// at call time and requests transfers; it never caches what it was told.
pub trait BalanceLedger {
    /// Current balance of `account`. Unknown accounts hold zero.
    fn balance_of(&self, account: &Identity) -> Result<Amount, LedgerError>;

    /// Move `amount` from `from` to `to`. Either the whole amount moves or
    /// nothing does.
    fn transfer(&self, from: &Identity, to: &Identity, amount: Amount) -> Result<(), LedgerError>;
}

impl<L: BalanceLedger + ?Sized> BalanceLedger for Arc<L> {
    fn balance_of(&self, account: &Identity) -> Result<Amount, LedgerError> {
        (**self).balance_of(account)
    }

    fn transfer(&self, from: &Identity, to: &Identity, amount: Amount) -> Result<(), LedgerError> {
        (**self).transfer(from, to, amount)
    }
}
