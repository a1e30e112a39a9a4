//! Nullable infrastructure for deterministic testing.
//!
//! Everything the accrual core treats as an external collaborator (the
//! clock, the principal ledger, access control, durable storage) has an
//! in-memory implementation here that:
//! - Returns deterministic values
//! - Can be controlled programmatically
//! - Never touches the filesystem or network
//!
//! Usage: swap host implementations for nullables in tests.

pub mod access;
pub mod clock;
pub mod principal;
pub mod store;

pub use access::NullAccessControl;
pub use clock::NullClock;
pub use principal::NullPrincipalLedger;
pub use store::NullAccrualStore;
