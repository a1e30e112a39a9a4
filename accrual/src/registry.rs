//! Global rate and per-holder locked rates.

use crate::error::AccrualError;
use accrue_types::{HolderAddress, Rate, RatePolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The process-wide rate with a version that bumps on every accepted change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalRate {
    pub rate: Rate,
    pub version: u64,
}

impl GlobalRate {
    pub fn new(rate: Rate) -> Self {
        Self { rate, version: 0 }
    }
}

/// Holds the global rate and the rate frozen for each holder at their first
/// checkpoint.
///
/// Holders absent from `holder_rates` read as [`Rate::ZERO`].
#[derive(Clone, Debug)]
pub struct RateRegistry {
    global: GlobalRate,
    policy: RatePolicy,
    holder_rates: HashMap<HolderAddress, Rate>,
}

impl RateRegistry {
    pub fn new(initial_rate: Rate, policy: RatePolicy) -> Self {
        Self::with_global(GlobalRate::new(initial_rate), policy)
    }

    /// Rebuild a registry around a previously persisted global rate.
    pub fn with_global(global: GlobalRate, policy: RatePolicy) -> Self {
        Self {
            global,
            policy,
            holder_rates: HashMap::new(),
        }
    }

    pub fn current_global_rate(&self) -> Rate {
        self.global.rate
    }

    pub fn global(&self) -> GlobalRate {
        self.global
    }

    pub fn policy(&self) -> RatePolicy {
        self.policy
    }

    /// Replace the global rate if the direction policy allows it.
    ///
    /// Returns the previous value. On rejection nothing changes.
    pub fn set_global_rate(&mut self, new_rate: Rate) -> Result<GlobalRate, AccrualError> {
        let current = self.global;
        if !self.policy.is_allowed_transition(current.rate, new_rate) {
            return Err(AccrualError::RateDirectionViolation {
                current: current.rate,
                proposed: new_rate,
                policy: self.policy,
            });
        }
        let version = current
            .version
            .checked_add(1)
            .ok_or(AccrualError::ArithmeticOverflow)?;
        self.global = GlobalRate {
            rate: new_rate,
            version,
        };
        Ok(current)
    }

    pub fn holder_rate(&self, holder: &HolderAddress) -> Rate {
        self.holder_rates.get(holder).copied().unwrap_or(Rate::ZERO)
    }

    /// Lock the current global rate onto `holder` if they have none yet.
    ///
    /// Returns the rate that was locked, or `None` if the holder already had one.
    pub fn lock_if_unset(&mut self, holder: &HolderAddress) -> Option<Rate> {
        if !self.holder_rate(holder).is_zero() {
            return None;
        }
        let rate = self.global.rate;
        if !rate.is_zero() {
            self.holder_rates.insert(holder.clone(), rate);
        }
        Some(rate)
    }

    /// Restore a persisted holder rate verbatim.
    pub(crate) fn restore_holder_rate(&mut self, holder: HolderAddress, rate: Rate) {
        if !rate.is_zero() {
            self.holder_rates.insert(holder, rate);
        }
    }
}
