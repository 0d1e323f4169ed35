//! Access gate for privileged operations.

use lockvote_types::Identity;
use std::sync::Arc;

/// Decides whether a caller may perform privileged operations (opening rounds).
pub trait AccessGate {
    fn is_authority(&self, caller: &Identity) -> bool;
}

/// One designated owner holds authority; nobody else does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleAuthority {
    owner: Identity,
}

impl SingleAuthority {
    pub fn new(owner: Identity) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> &Identity {
        &self.owner
    }
}

impl AccessGate for SingleAuthority {
    fn is_authority(&self, caller: &Identity) -> bool {
        *caller == self.owner
    }
}

impl<G: AccessGate + ?Sized> AccessGate for Arc<G> {
    fn is_authority(&self, caller: &Identity) -> bool {
        (**self).is_authority(caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_owner_is_authority() {
        let gate = SingleAuthority::new(Identity::new("owner"));
        assert!(gate.is_authority(&Identity::new("owner")));
        assert!(!gate.is_authority(&Identity::new("mallory")));
        assert_eq!(gate.owner().as_str(), "owner");
    }
}
