//! Holder lifecycle state.

use serde::{Deserialize, Serialize};

/// Where a holder sits in its accrual lifecycle.
///
/// `Uninitialized → Active` is the only transition and it is irreversible:
/// it happens on the holder's first checkpoint, when their rate is locked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HolderState {
    /// Never checkpointed: zero rate, epoch timestamp, growth factor of one.
    Uninitialized,
    /// Rate locked; only the last-update timestamp moves from here on.
    Active,
}
