//! Non-fungible token record
//!
//! A token is a uniquely identified, indivisible unit of ownership.

use crate::crypto::EntropyError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Holder not found: {0}")]
    HolderNotFound(String),
    #[error("Token not found: {0}")]
    TokenNotFound(String),
    #[error("Failed to generate token id: {0}")]
    Entropy(#[from] EntropyError),
    #[error("No unique token id found after {attempts} attempts")]
    IdExhausted { attempts: u32 },
}

/// A non-fungible token and its current owner
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Token {
    /// Unique 10-character hex identifier
    pub id: String,
    /// Full name of the owning holder
    pub owner: String,
}

impl Token {
    pub fn new(id: String, owner: String) -> Self {
        Self { id, owner }
    }

    /// Check whether the token belongs to the given holder
    pub fn is_owned_by(&self, holder: &str) -> bool {
        self.owner == holder
    }
}
