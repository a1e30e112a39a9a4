//! Per-holder checkpoint timestamps.

use accrue_types::{HolderAddress, Timestamp};
use std::collections::HashMap;

/// Records when each holder was last checkpointed.
///
/// The clock trusts its caller: `touch` does not reject a timestamp earlier
/// than the stored one. The ledger checks for regression before touching.
#[derive(Clone, Debug, Default)]
pub struct AccrualClock {
    last_updates: HashMap<HolderAddress, Timestamp>,
}

impl AccrualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last checkpoint of `holder`, or [`Timestamp::EPOCH`] if never checkpointed.
    pub fn last_update(&self, holder: &HolderAddress) -> Timestamp {
        self.last_updates
            .get(holder)
            .copied()
            .unwrap_or(Timestamp::EPOCH)
    }

    pub fn touch(&mut self, holder: &HolderAddress, now: Timestamp) {
        debug_assert!(
            now >= self.last_update(holder),
            "accrual clock moved backwards for {holder}"
        );
        self.last_updates.insert(holder.clone(), now);
    }

    /// Whether `holder` has ever been checkpointed.
    pub fn is_tracked(&self, holder: &HolderAddress) -> bool {
        self.last_updates.contains_key(holder)
    }

    pub fn holders(&self) -> impl Iterator<Item = &HolderAddress> {
        self.last_updates.keys()
    }

    pub fn len(&self) -> usize {
        self.last_updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_updates.is_empty()
    }
}
