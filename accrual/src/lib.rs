//! Accrual engine for an interest-bearing rebase ledger.
//!
//! A holder's balance is never rewritten as time passes. It is projected on
//! read from three stored inputs and the query time:
//! `balance(h, now) = principal(h) × (ONE + rate(h) × (now − last_update(h))) / ONE`
//!
//! This crate handles:
//! - The global rate and its direction policy, plus per-holder locked rates
//! - Per-holder checkpoint timestamps
//! - Pure growth-factor and effective-balance math
//! - Checkpoint ordering for mint, burn and transfer

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod ledger;
pub mod logging;
pub mod projector;
pub mod registry;

pub use clock::AccrualClock;
pub use config::LedgerConfig;
pub use error::AccrualError;
pub use event::{EventBus, LedgerEvent};
pub use ledger::{HolderRecord, RebaseLedger, ALL};
pub use logging::{init_logging, LogFormat};
pub use projector::{AccrualSnapshot, CheckpointPlan};
pub use registry::{GlobalRate, RateRegistry};
