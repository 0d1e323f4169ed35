//! Nullable access gate: a mutable authority set for testing.

use lockvote_ledger::AccessGate;
use lockvote_types::Identity;
use std::collections::HashSet;
use std::sync::Mutex;

/// An access gate whose authority set tests can change at will.
#[derive(Debug, Default)]
pub struct NullAccessGate {
    authorities: Mutex<HashSet<Identity>>,
}

impl NullAccessGate {
    /// A gate that recognises exactly one authority.
    pub fn with_authority(authority: &Identity) -> Self {
        let gate = Self::default();
        gate.grant(authority);
        gate
    }

    pub fn grant(&self, who: &Identity) {
        self.authorities.lock().unwrap().insert(who.clone());
    }

    pub fn revoke(&self, who: &Identity) {
        self.authorities.lock().unwrap().remove(who);
    }
}

impl AccessGate for NullAccessGate {
    fn is_authority(&self, caller: &Identity) -> bool {
        self.authorities.lock().unwrap().contains(caller)
    }
}
