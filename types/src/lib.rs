//! Fundamental types for the accrue ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! holder addresses, timestamps, fixed-point rates, ledger parameters and the
//! policies that govern rate changes and checkpoints.

pub mod address;
pub mod error;
pub mod params;
pub mod rate;
pub mod state;
pub mod time;

pub use address::HolderAddress;
pub use error::TypesError;
pub use params::{CheckpointMode, LedgerParams, RatePolicy, TransferCheckpoint};
pub use rate::{Rate, DEFAULT_GLOBAL_RATE, ONE, PRECISION_FACTOR};
pub use state::HolderState;
pub use time::Timestamp;
