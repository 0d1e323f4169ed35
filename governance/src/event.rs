//! Notifications emitted by committed operations.

use lockvote_types::{Amount, Choice, Identity, RoundId, Timestamp};
use serde::{Deserialize, Serialize};

/// Engine-level events. Exactly one is emitted per successful state-changing
/// call; failed calls emit nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VotingEvent {
    /// A new round became current.
    RoundOpened {
        start: Timestamp,
        end: Timestamp,
        round: RoundId,
        description: String,
    },
    /// A vote was locked; `weight` is the influence this cast added.
    VoteCast {
        round: RoundId,
        voter: Identity,
        choice: Choice,
        weight: Amount,
    },
    /// Locked balance was returned to `voter`.
    WithdrawalMade {
        round: RoundId,
        voter: Identity,
        amount: Amount,
    },
}

impl VotingEvent {
    pub fn round(&self) -> RoundId {
        match self {
            Self::RoundOpened { round, .. }
            | Self::VoteCast { round, .. }
            | Self::WithdrawalMade { round, .. } => *round,
        }
    }
}

/// Synchronous fan-out event bus.
///
/// Listeners are invoked inline on the emitting thread while the engine is
/// mid-operation; keep handlers fast and never call back into the engine.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&VotingEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&VotingEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &VotingEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn emit_reaches_every_listener() {
        let mut bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            bus.subscribe(Box::new(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            }));
        }
        let event = VotingEvent::WithdrawalMade {
            round: RoundId::new(4),
            voter: Identity::new("v"),
            amount: Amount::new(9),
        };
        bus.emit(&event);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert_eq!(bus.listener_count(), 3);
        assert_eq!(event.round(), RoundId::new(4));
    }
}
