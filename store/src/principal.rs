//! The principal-ledger collaborator.

use crate::StoreError;
use accrue_types::HolderAddress;

/// Raw unit balances kept by the base token ledger.
///
/// The accrual core multiplies growth onto these balances but never stores
/// them itself. Unknown holders have a principal of zero.
pub trait PrincipalLedger {
    /// Raw principal recorded for `holder`.
    fn principal_of(&self, holder: &HolderAddress) -> u128;

    /// Add `amount` to `holder`'s principal and to the total.
    ///
    /// Fails with [`StoreError::Overflow`] if either sum would overflow; in
    /// that case nothing changes.
    fn credit_principal(&mut self, holder: &HolderAddress, amount: u128) -> Result<(), StoreError>;

    /// Remove `amount` from `holder`'s principal and from the total.
    ///
    /// Fails with [`StoreError::InsufficientPrincipal`] if the holder has
    /// less than `amount`; in that case nothing changes.
    fn debit_principal(&mut self, holder: &HolderAddress, amount: u128) -> Result<(), StoreError>;

    /// Sum of all recorded principal.
    fn total_principal(&self) -> u128;
}
