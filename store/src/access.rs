//! The access-control collaborator.

use accrue_types::HolderAddress;
use std::fmt;

/// Privileged capabilities the ledger checks before acting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// May change the global rate.
    RateSetter,
    /// May mint and burn principal on behalf of holders.
    MintAndBurn,
    /// May transfer and checkpoint on behalf of any holder.
    Operator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateSetter => f.write_str("rate_setter"),
            Self::MintAndBurn => f.write_str("mint_and_burn"),
            Self::Operator => f.write_str("operator"),
        }
    }
}

/// Decides which callers hold which roles. Owned by the host, queried by the ledger.
pub trait AccessControl {
    fn is_authorized(&self, caller: &HolderAddress, role: Role) -> bool;
}
