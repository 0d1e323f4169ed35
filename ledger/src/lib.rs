//! Abstract collaborator traits for the lockvote engine.
//!
//! The engine does not own balances or decide who may administer rounds.
//! Both concerns sit behind the traits in this crate; production hosts plug
//! in their ledger and access control, tests plug in nullables.

pub mod access;
pub mod balance;
pub mod error;

pub use access::{AccessGate, SingleAuthority};
pub use balance::BalanceLedger;
pub use error::LedgerError;
