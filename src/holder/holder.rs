//! Holder record and holder errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Holder-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HolderError {
    #[error("name must not be empty")]
    EmptyName,
}

/// A named entity eligible to own tokens
///
/// The full name is both the key and the only attribute.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Holder {
    #[serde(rename = "fullName")]
    pub full_name: String,
}

impl Holder {
    /// Create a holder, rejecting blank names
    pub fn new(full_name: impl Into<String>) -> Result<Self, HolderError> {
        let full_name = full_name.into();
        if full_name.trim().is_empty() {
            return Err(HolderError::EmptyName);
        }
        Ok(Self { full_name })
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}
