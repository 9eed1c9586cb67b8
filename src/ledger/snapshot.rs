//! Point-in-time view of a ledger
//!
//! A snapshot holds clones of the ledger's persistent registries, so taking
//! one is O(1) and shares every unchanged node with the live ledger.

use crate::crypto::is_valid_token_id;
use crate::holder::{Holder, HolderError, HolderRegistry};
use crate::token::{Token, TokenRegistry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a snapshot cannot be assembled from raw records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Invalid holder: {0}")]
    InvalidHolder(#[from] HolderError),

    #[error("Malformed token id: {0}")]
    MalformedTokenId(String),

    #[error("Duplicate token id: {0}")]
    DuplicateToken(String),

    #[error("Token {token} is owned by unknown holder {owner}")]
    UnknownOwner { token: String, owner: String },
}

/// Immutable view of the holders and tokens at one moment
///
/// Holders are ordered by name and tokens by id whatever order they were
/// supplied in, so repeated queries always return the same order.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "SnapshotRecord", try_from = "SnapshotRecord")]
pub struct LedgerSnapshot {
    holders: HolderRegistry,
    tokens: TokenRegistry,
    taken_at: DateTime<Utc>,
}

/// Wire form: plain sorted lists
#[derive(Serialize, Deserialize)]
struct SnapshotRecord {
    holders: Vec<Holder>,
    tokens: Vec<Token>,
    taken_at: DateTime<Utc>,
}

impl LedgerSnapshot {
    /// Share the current registries without copying them
    pub(crate) fn capture(holders: &HolderRegistry, tokens: &TokenRegistry) -> Self {
        Self {
            holders: holders.clone(),
            tokens: tokens.clone(),
            taken_at: Utc::now(),
        }
    }

    /// Build a snapshot from loose records, in any order
    ///
    /// Every token must have a well-formed, unique id and a registered owner.
    /// Holders listed twice are kept once.
    pub fn from_parts(
        holders: impl IntoIterator<Item = Holder>,
        tokens: impl IntoIterator<Item = Token>,
    ) -> Result<Self, SnapshotError> {
        Self::assemble(holders, tokens, Utc::now())
    }

    fn assemble(
        holders: impl IntoIterator<Item = Holder>,
        tokens: impl IntoIterator<Item = Token>,
        taken_at: DateTime<Utc>,
    ) -> Result<Self, SnapshotError> {
        let mut holder_registry = HolderRegistry::new();
        for holder in holders {
            holder_registry.insert(Holder::new(holder.full_name)?);
        }

        let mut token_registry = TokenRegistry::new();
        for token in tokens {
            if !is_valid_token_id(&token.id) {
                return Err(SnapshotError::MalformedTokenId(token.id));
            }
            if !holder_registry.exists(&token.owner) {
                return Err(SnapshotError::UnknownOwner {
                    token: token.id,
                    owner: token.owner,
                });
            }
            let id = token.id.clone();
            if !token_registry.insert(token) {
                return Err(SnapshotError::DuplicateToken(id));
            }
        }

        Ok(Self {
            holders: holder_registry,
            tokens: token_registry,
            taken_at,
        })
    }

    /// Snapshot of a ledger with no holders and no tokens
    pub fn empty() -> Self {
        Self::capture(&HolderRegistry::new(), &TokenRegistry::new())
    }

    /// Tokens owned by `owner`, in id order
    pub fn tokens_of(&self, owner: &str) -> Vec<Token> {
        self.tokens.list_by_owner(owner)
    }

    pub fn holder_exists(&self, name: &str) -> bool {
        self.holders.exists(name)
    }

    pub fn token(&self, token_id: &str) -> Option<&Token> {
        self.tokens.get(token_id)
    }

    /// Holders in name order
    pub fn holders(&self) -> impl Iterator<Item = &Holder> {
        self.holders.iter()
    }

    /// Tokens in id order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn holder_count(&self) -> usize {
        self.holders.len()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    /// Whether two snapshots share the same underlying maps
    #[cfg(test)]
    pub(crate) fn shares_storage_with(&self, other: &Self) -> (bool, bool) {
        (
            self.holders.shares_storage_with(&other.holders),
            self.tokens.shares_storage_with(&other.tokens),
        )
    }
}

impl From<LedgerSnapshot> for SnapshotRecord {
    fn from(snapshot: LedgerSnapshot) -> Self {
        Self {
            holders: snapshot.holders().cloned().collect(),
            tokens: snapshot.tokens().cloned().collect(),
            taken_at: snapshot.taken_at,
        }
    }
}

impl TryFrom<SnapshotRecord> for LedgerSnapshot {
    type Error = SnapshotError;

    fn try_from(record: SnapshotRecord) -> Result<Self, Self::Error> {
        Self::assemble(record.holders, record.tokens, record.taken_at)
    }
}
