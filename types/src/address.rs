//! Participant identity on the external balance ledger.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque ledger identity: a voter, the round authority, or the custody account.
///
/// The engine never interprets the contents beyond equality; any non-empty,
/// whitespace-free string is accepted.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Create a new identity from a raw string.
    ///
    /// # Panics
    /// Panics if the string is empty or contains whitespace. Use
    /// [`Identity::try_new`] for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        match Self::try_new(raw) {
            Ok(id) => id,
            Err(e) => panic!("{e}"),
        }
    }

    /// Validate and wrap a raw identity string.
    pub fn try_new(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if s.is_empty() {
            return Err(TypesError::EmptyIdentity);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(TypesError::InvalidIdentity(s));
        }
        Ok(Self(s))
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Identity {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl From<Identity> for String {
    fn from(id: Identity) -> Self {
        id.0
    }
}
