//! The two-way ballot choice.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A yes/no ballot choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Choice {
    No,
    Yes,
}

impl From<bool> for Choice {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl From<Choice> for bool {
    fn from(choice: Choice) -> Self {
        choice == Choice::Yes
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::No => write!(f, "no"),
            Self::Yes => write!(f, "yes"),
        }
    }
}
