//! Ledger parameters and the policies that shape accrual behaviour.

use crate::error::TypesError;
use crate::rate::{Rate, DEFAULT_GLOBAL_RATE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which direction a global rate change may move.
///
/// Equal values are accepted under either policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePolicy {
    /// Reject any increase.
    #[default]
    DecreaseOnly,
    /// Reject any decrease. Used by legacy deployments.
    IncreaseOnly,
}

impl RatePolicy {
    /// Whether moving the global rate from `old` to `new` is permitted.
    pub fn is_allowed_transition(&self, old: Rate, new: Rate) -> bool {
        match self {
            Self::DecreaseOnly => new <= old,
            Self::IncreaseOnly => new >= old,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DecreaseOnly => "decrease_only",
            Self::IncreaseOnly => "increase_only",
        }
    }
}

impl fmt::Display for RatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RatePolicy {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "decrease_only" | "decrease-only" => Ok(Self::DecreaseOnly),
            "increase_only" | "increase-only" => Ok(Self::IncreaseOnly),
            _ => Err(TypesError::UnknownRatePolicy(s.to_string())),
        }
    }
}

/// What a checkpoint does with interest owed since the holder's last update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointMode {
    /// Credit the owed delta to principal, then advance the clock.
    #[default]
    Materialize,
    /// Advance the clock only. The owed delta is reported as forfeited.
    ClockOnly,
}

/// Whether transfers checkpoint their parties before moving principal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferCheckpoint {
    /// Checkpoint sender then recipient before the principal moves.
    #[default]
    BothParties,
    /// Move raw principal without touching either party's accrual state.
    Disabled,
}

/// All parameters a ledger instance is created with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Global rate at ledger creation.
    pub initial_rate: Rate,
    /// Direction guard applied to every global rate change.
    pub rate_policy: RatePolicy,
    /// Whether checkpoints credit owed interest.
    pub checkpoint_mode: CheckpointMode,
    /// Whether transfers checkpoint both parties.
    pub transfer_checkpoint: TransferCheckpoint,
}

impl LedgerParams {
    /// Legacy parameters: the rate may only rise, checkpoints never credit
    /// interest, transfers move raw principal.
    pub fn legacy() -> Self {
        Self {
            initial_rate: DEFAULT_GLOBAL_RATE,
            rate_policy: RatePolicy::IncreaseOnly,
            checkpoint_mode: CheckpointMode::ClockOnly,
            transfer_checkpoint: TransferCheckpoint::Disabled,
        }
    }

    pub fn with_initial_rate(mut self, rate: Rate) -> Self {
        self.initial_rate = rate;
        self
    }

    pub fn with_rate_policy(mut self, policy: RatePolicy) -> Self {
        self.rate_policy = policy;
        self
    }

    pub fn with_checkpoint_mode(mut self, mode: CheckpointMode) -> Self {
        self.checkpoint_mode = mode;
        self
    }

    pub fn with_transfer_checkpoint(mut self, policy: TransferCheckpoint) -> Self {
        self.transfer_checkpoint = policy;
        self
    }
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            initial_rate: DEFAULT_GLOBAL_RATE,
            rate_policy: RatePolicy::default(),
            checkpoint_mode: CheckpointMode::default(),
            transfer_checkpoint: TransferCheckpoint::default(),
        }
    }
}
