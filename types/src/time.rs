//! Timestamp type used throughout the ledger.
//!
//! Timestamps are Unix epoch seconds (UTC) supplied by the host environment.
//! The ledger never reads the wall clock on its own; every operation receives
//! `now` explicitly so that runs are reproducible.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero). Also the "never checkpointed" marker.
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed from this timestamp to `now`, saturating at zero.
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Seconds elapsed from this timestamp to `now`, or `None` if `now` is earlier.
    pub fn checked_elapsed(&self, now: Timestamp) -> Option<u64> {
        now.0.checked_sub(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
