//! Nullable principal ledger: in-memory raw balances for testing.

use accrue_store::{PrincipalLedger, StoreError};
use accrue_types::HolderAddress;
use std::collections::HashMap;

/// An in-memory stand-in for the base token ledger.
#[derive(Clone, Debug, Default)]
pub struct NullPrincipalLedger {
    balances: HashMap<HolderAddress, u128>,
    total: u128,
}

impl NullPrincipalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of holders with a non-zero principal.
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }
}

impl PrincipalLedger for NullPrincipalLedger {
    fn principal_of(&self, holder: &HolderAddress) -> u128 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    fn credit_principal(&mut self, holder: &HolderAddress, amount: u128) -> Result<(), StoreError> {
        let balance = self
            .principal_of(holder)
            .checked_add(amount)
            .ok_or_else(|| StoreError::Overflow(holder.to_string()))?;
        let total = self
            .total
            .checked_add(amount)
            .ok_or_else(|| StoreError::Overflow("total principal".to_string()))?;
        if balance > 0 {
            self.balances.insert(holder.clone(), balance);
        }
        self.total = total;
        Ok(())
    }

    fn debit_principal(&mut self, holder: &HolderAddress, amount: u128) -> Result<(), StoreError> {
        let available = self.principal_of(holder);
        let balance = available
            .checked_sub(amount)
            .ok_or_else(|| StoreError::InsufficientPrincipal {
                holder: holder.to_string(),
                needed: amount,
                available,
            })?;
        if balance == 0 {
            self.balances.remove(holder);
        } else {
            self.balances.insert(holder.clone(), balance);
        }
        // total >= every individual balance
        self.total -= amount;
        Ok(())
    }

    fn total_principal(&self) -> u128 {
        self.total
    }
}
