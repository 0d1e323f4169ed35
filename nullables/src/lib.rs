//! Nullable infrastructure for deterministic testing.
//!
//! All external collaborators of the engine (clock, balance ledger, access
//! gate) are abstracted behind traits. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem, network or wall clock
//!
//! Usage: swap real implementations for nullables in tests.

pub mod access;
pub mod clock;
pub mod ledger;

pub use access::NullAccessGate;
pub use clock::NullClock;
pub use ledger::NullLedger;
