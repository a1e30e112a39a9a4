//! Holder address type with `acr_` prefix.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a balance holder, always prefixed with `acr_`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HolderAddress(String);

impl HolderAddress {
    /// The standard prefix for all holder addresses.
    pub const PREFIX: &'static str = "acr_";

    /// Create a new holder address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `acr_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with acr_");
        Self(s)
    }

    /// Fallible counterpart of [`HolderAddress::new`] for untrusted input.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let addr = Self(raw.into());
        if !addr.is_valid() {
            return Err(TypesError::InvalidAddress(addr.0));
        }
        Ok(addr)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for HolderAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for HolderAddress {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}
