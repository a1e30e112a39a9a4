//! Errors raised while constructing fundamental types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid holder address: {0}")]
    InvalidAddress(String),

    #[error("unknown rate policy: {0}")]
    UnknownRatePolicy(String),
}
