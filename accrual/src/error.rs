//! Accrual-specific errors.

use accrue_store::{Role, StoreError};
use accrue_types::{Rate, RatePolicy, Timestamp};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccrualError {
    #[error("rate change from {current} to {proposed} violates the {policy} policy")]
    RateDirectionViolation {
        current: Rate,
        proposed: Rate,
        policy: RatePolicy,
    },

    #[error("arithmetic overflow in accrual computation")]
    ArithmeticOverflow,

    #[error("clock moved backwards: last update {last}, now {now}")]
    ClockRegression { last: Timestamp, now: Timestamp },

    #[error("insufficient principal: need {needed}, available {available}")]
    InsufficientPrincipal { needed: u128, available: u128 },

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("{caller} is not authorized as {role}")]
    Unauthorized { caller: String, role: Role },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
