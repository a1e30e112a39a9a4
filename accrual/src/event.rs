//! Events emitted by the ledger for off-core observers.

use accrue_types::{HolderAddress, Rate, Timestamp};

/// Ledger-level events that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerEvent {
    /// The global rate was replaced.
    GlobalRateChanged { old: Rate, new: Rate, version: u64 },
    /// A holder was checkpointed for the first time and had a rate locked.
    HolderActivated {
        holder: HolderAddress,
        rate: Rate,
        at: Timestamp,
    },
    /// A holder activated under a zero global rate locked a real rate later.
    RateLocked {
        holder: HolderAddress,
        rate: Rate,
        at: Timestamp,
    },
    /// Owed interest was credited to a holder's principal.
    InterestMaterialized {
        holder: HolderAddress,
        amount: u128,
        at: Timestamp,
    },
    /// Owed interest was dropped by a clock-only checkpoint.
    InterestForfeited {
        holder: HolderAddress,
        amount: u128,
        at: Timestamp,
    },
    /// Principal was minted to a holder.
    Minted { holder: HolderAddress, amount: u128 },
    /// Principal was burned from a holder.
    Burned { holder: HolderAddress, amount: u128 },
    /// Principal moved between holders.
    Transferred {
        from: HolderAddress,
        to: HolderAddress,
        amount: u128,
    },
}

/// Synchronous fan-out event bus for ledger events.
///
/// Listeners are invoked inline on the emitting thread after the operation
/// has committed; keep handlers fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&LedgerEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &LedgerEvent) {
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
    use std::sync::{Arc, Mutex};

    #[test]
    fn emit_reaches_every_listener() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        for _ in 0..2 {
            let seen = Arc::clone(&seen);
            bus.subscribe(Box::new(move |e| seen.lock().unwrap().push(e.clone())));
        }
        let event = LedgerEvent::GlobalRateChanged {
            old: Rate::new(5),
            new: Rate::new(4),
            version: 1,
        };
        bus.emit(&event);
        assert_eq!(bus.listener_count(), 2);
        assert_eq!(*seen.lock().unwrap(), vec![event.clone(), event]);
    }

    #[test]
    fn emit_without_listeners_is_a_no_op() {
        let bus = EventBus::default();
        bus.emit(&LedgerEvent::Minted {
            holder: HolderAddress::new("acr_a"),
            amount: 1,
        });
        assert_eq!(bus.listener_count(), 0);
    }
}
