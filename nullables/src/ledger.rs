//! Nullable balance ledger: thread-safe in-memory balances for testing.

use lockvote_ledger::{BalanceLedger, LedgerError};
use lockvote_types::{Amount, Identity};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// An in-memory balance ledger.
///
/// Transfers can be forced to fail with [`NullLedger::fail_transfers`] to
/// exercise the engine's abort paths.
#[derive(Debug, Default)]
pub struct NullLedger {
    balances: Mutex<HashMap<Identity, Amount>>,
    fail_transfers: AtomicBool,
    transfer_count: AtomicUsize,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the balance of an account, replacing whatever it held.
    pub fn set_balance(&self, account: &Identity, amount: Amount) {
        self.balances
            .lock()
            .unwrap()
            .insert(account.clone(), amount);
    }

    /// Builder-style variant of [`NullLedger::set_balance`].
    pub fn with_balance(self, account: &Identity, amount: u128) -> Self {
        self.set_balance(account, Amount::new(amount));
        self
    }

    /// Make every subsequent transfer fail (or succeed again).
    pub fn fail_transfers(&self, fail: bool) {
        self.fail_transfers.store(fail, Ordering::SeqCst);
    }

    /// Number of transfers that completed successfully.
    pub fn transfer_count(&self) -> usize {
        self.transfer_count.load(Ordering::SeqCst)
    }

    /// Sum of all balances on the ledger.
    pub fn total_supply(&self) -> u128 {
        self.balances
            .lock()
            .unwrap()
            .values()
            .map(|a| a.raw())
            .sum()
    }
}

impl BalanceLedger for NullLedger {
    fn balance_of(&self, account: &Identity) -> Result<Amount, LedgerError> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(account)
            .copied()
            .unwrap_or(Amount::ZERO))
    }

    fn transfer(&self, from: &Identity, to: &Identity, amount: Amount) -> Result<(), LedgerError> {
        if self.fail_transfers.load(Ordering::SeqCst) {
            return Err(LedgerError::Rejected("transfers disabled".into()));
        }
        let mut balances = self.balances.lock().unwrap();
        let available = balances.get(from).copied().unwrap_or(Amount::ZERO);
        let remaining = available
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientFunds {
                account: from.clone(),
                needed: amount.raw(),
                available: available.raw(),
            })?;
        if from == to {
            self.transfer_count.fetch_add(1, Ordering::SeqCst);
            return Ok(());
        }
        let credited = balances
            .get(to)
            .copied()
            .unwrap_or(Amount::ZERO)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Backend("balance overflow".into()))?;
        balances.insert(from.clone(), remaining);
        balances.insert(to.clone(), credited);
        self.transfer_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
