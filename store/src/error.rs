use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("insufficient principal for {holder}: need {needed}, have {available}")]
    InsufficientPrincipal {
        holder: String,
        needed: u128,
        available: u128,
    },

    #[error("principal overflow for {0}")]
    Overflow(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}
