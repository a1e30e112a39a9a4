//! Abstract storage traits and collaborator contracts for the accrue ledger.
//!
//! The accrual core never talks to a storage engine, a token ledger or an
//! authorization service directly. Hosts implement these traits; tests use
//! the in-memory versions from `accrue-nullables`.

pub mod access;
pub mod accrual;
pub mod error;
pub mod principal;

pub use access::{AccessControl, Role};
pub use accrual::AccrualStore;
pub use error::StoreError;
pub use principal::PrincipalLedger;
