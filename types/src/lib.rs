//! Fundamental types for the lockvote engine.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! participant identities, balance amounts, round ids, ballot choices, timestamps,
//! the clock abstraction, and the engine's run-time parameters.

pub mod address;
pub mod amount;
pub mod choice;
pub mod error;
pub mod params;
pub mod round;
pub mod time;

pub use address::Identity;
pub use amount::Amount;
pub use choice::Choice;
pub use error::TypesError;
pub use params::{RoundPolicy, VotingParams};
pub use round::RoundId;
pub use time::{Clock, SystemClock, Timestamp};
