//! Ledger operations over an external key-value store
//!
//! Records are JSON documents under `holder:<name>` and `token:<id>`.
//! Listing relies on the store's field query instead of a local owner
//! index. A mutex around the store makes each operation one transaction,
//! so reads inside an operation always see that operation's own writes.
//! A token record that disagrees with its key, or a query result that does
//! not match the query, is reported as [`StoreError::InvalidData`].

use crate::crypto::{IdSource, OsIdGenerator};
use crate::holder::Holder;
use crate::ledger::{LedgerConfig, LedgerError, TokenLedger};
use crate::storage::store::{KeyValueStore, StoreError};
use crate::token::registry::draw_unique_id;
use crate::token::Token;
use parking_lot::Mutex;

const HOLDER_PREFIX: &str = "holder:";
const TOKEN_PREFIX: &str = "token:";

fn holder_key(name: &str) -> String {
    format!("{}{}", HOLDER_PREFIX, name)
}

fn token_key(token_id: &str) -> String {
    format!("{}{}", TOKEN_PREFIX, token_id)
}

struct StoreInner<S> {
    store: S,
    ids: Box<dyn IdSource>,
    max_id_attempts: u32,
}

/// A ledger whose records live in a [`KeyValueStore`]
pub struct StoreLedger<S> {
    inner: Mutex<StoreInner<S>>,
}

impl<S: KeyValueStore> StoreLedger<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, LedgerConfig::default())
    }

    pub fn with_config(store: S, config: LedgerConfig) -> Self {
        Self::with_id_source(store, config, OsIdGenerator::new())
    }

    pub fn with_id_source<I: IdSource + 'static>(store: S, config: LedgerConfig, ids: I) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                store,
                ids: Box::new(ids),
                max_id_attempts: config.max_id_attempts.max(1),
            }),
        }
    }

    /// Give back the underlying store
    pub fn into_inner(self) -> S {
        self.inner.into_inner().store
    }

    /// Check whether a holder record exists
    pub fn holder_exists(&self, name: &str) -> Result<bool, LedgerError> {
        Ok(self.inner.lock().holder_exists(name)?)
    }

    /// Look up a single token
    pub fn token(&self, token_id: &str) -> Result<Option<Token>, LedgerError> {
        Ok(self.inner.lock().load_token(token_id)?)
    }
}

impl<S: KeyValueStore> StoreInner<S> {
    fn holder_exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.store.get(&holder_key(name))?.is_some())
    }

    fn load_token(&self, token_id: &str) -> Result<Option<Token>, StoreError> {
        let Some(bytes) = self.store.get(&token_key(token_id))? else {
            return Ok(None);
        };

        let token: Token = serde_json::from_slice(&bytes)?;
        if token.id != token_id {
            log::error!("Token record {} holds id {}", token_key(token_id), token.id);
            return Err(StoreError::InvalidData(format!(
                "record {} holds token {}",
                token_key(token_id),
                token.id
            )));
        }
        Ok(Some(token))
    }

    fn save_token(&mut self, token: &Token) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(token)?;
        self.store.put(&token_key(&token.id), bytes)
    }

    fn register_holder(&mut self, name: &str) -> Result<bool, LedgerError> {
        let holder = Holder::new(name)?;
        if self.holder_exists(name)? {
            return Ok(false);
        }

        let bytes = serde_json::to_vec(&holder).map_err(StoreError::from)?;
        self.store.put(&holder_key(name), bytes)?;

        log::info!("Holder registered in store: {}", name);
        Ok(true)
    }

    fn create_token(&mut self, owner: &str) -> Result<Token, LedgerError> {
        if !self.holder_exists(owner)? {
            return Err(LedgerError::HolderNotFound(owner.to_string()));
        }

        let store = &self.store;
        let id = draw_unique_id::<LedgerError>(self.ids.as_mut(), self.max_id_attempts, |candidate| {
            Ok(store.get(&token_key(candidate))?.is_some())
        })?;

        let token = Token::new(id, owner.to_string());
        self.save_token(&token)?;

        log::info!("Token minted in store: {} -> {}", token.id, token.owner);
        Ok(token)
    }

    fn transfer_token(&mut self, token_id: &str, new_owner: &str) -> Result<(), LedgerError> {
        let mut token = self
            .load_token(token_id)?
            .ok_or_else(|| LedgerError::TokenNotFound(token_id.to_string()))?;

        if !self.holder_exists(new_owner)? {
            return Err(LedgerError::HolderNotFound(new_owner.to_string()));
        }

        if token.owner == new_owner {
            return Ok(());
        }

        let previous = std::mem::replace(&mut token.owner, new_owner.to_string());
        self.save_token(&token)?;

        log::info!(
            "Token transferred in store: {} {} -> {}",
            token_id,
            previous,
            new_owner
        );
        Ok(())
    }

    fn list_tokens(&self, owner: &str) -> Result<Vec<Token>, LedgerError> {
        let mut tokens = Vec::new();
        for bytes in self.store.query_by_field("owner", owner)? {
            let token: Token = serde_json::from_slice(&bytes).map_err(StoreError::from)?;
            if !token.is_owned_by(owner) {
                return Err(StoreError::InvalidData(format!(
                    "query for owner {} returned token {} owned by {}",
                    owner, token.id, token.owner
                ))
                .into());
            }
            tokens.push(token);
        }
        tokens.sort_by(|a, b| a.id.cmp(&b.id));

        log::debug!("Listed {} stored token(s) for {}", tokens.len(), owner);
        Ok(tokens)
    }
}

impl<S: KeyValueStore> TokenLedger for StoreLedger<S> {
    fn register_holder(&self, name: &str) -> Result<bool, LedgerError> {
        self.inner.lock().register_holder(name)
    }

    fn create_token(&self, owner: &str) -> Result<Token, LedgerError> {
        self.inner.lock().create_token(owner)
    }

    fn transfer_token(&self, token_id: &str, new_owner: &str) -> Result<(), LedgerError> {
        self.inner.lock().transfer_token(token_id, new_owner)
    }

    fn list_tokens(&self, owner: &str) -> Result<Vec<Token>, LedgerError> {
        self.inner.lock().list_tokens(owner)
    }
}
