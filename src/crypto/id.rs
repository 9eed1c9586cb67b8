//! Token identifier generation
//!
//! Identifiers are drawn from the operating system's CSPRNG and rendered as
//! lowercase hexadecimal. A generator only produces *candidates*; uniqueness
//! is enforced by the token registry, which discards collisions and retries.

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Number of random bytes behind each token identifier
pub const TOKEN_ID_BYTES: usize = 5;

/// Length of a rendered token identifier (two hex digits per byte)
pub const TOKEN_ID_LEN: usize = TOKEN_ID_BYTES * 2;

/// The entropy source failed to produce bytes
#[derive(Error, Debug)]
#[error("Entropy source failed: {0}")]
pub struct EntropyError(String);

impl EntropyError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl From<rand::Error> for EntropyError {
    fn from(err: rand::Error) -> Self {
        Self(err.to_string())
    }
}

/// A source of candidate token identifiers
pub trait IdSource: Send {
    /// Produce the next candidate identifier
    fn next_id(&mut self) -> Result<String, EntropyError>;
}

/// Identifier generator backed by the OS random number generator
///
/// Never falls back to a weaker RNG: if the OS source fails, the failure
/// is returned to the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsIdGenerator;

impl OsIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdSource for OsIdGenerator {
    fn next_id(&mut self) -> Result<String, EntropyError> {
        let mut bytes = [0u8; TOKEN_ID_BYTES];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(hex::encode(bytes))
    }
}

/// Check that a string has the token identifier shape (10 lowercase hex chars)
pub fn is_valid_token_id(id: &str) -> bool {
    id.len() == TOKEN_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
