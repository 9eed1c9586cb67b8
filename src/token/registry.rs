//! Token registry: minting, transfers and ownership queries
//!
//! Keeps every token by id together with an owner index so that listing a
//! holder's tokens does not scan the whole registry. Both maps are always
//! updated together. They are persistent maps, so a clone of the registry
//! is O(1) and shares structure with the original.

use crate::crypto::{is_valid_token_id, IdSource};
use crate::holder::HolderRegistry;
use crate::token::token::{Token, TokenError};
use im::{OrdMap, OrdSet};

/// Default ceiling on id draws per mint
pub const DEFAULT_MAX_ID_ATTEMPTS: u32 = 32;

/// Manages all tokens in a ledger
#[derive(Clone, Debug)]
pub struct TokenRegistry {
    /// All tokens by id
    tokens: OrdMap<String, Token>,
    /// Owner name -> ids of the tokens it holds
    by_owner: OrdMap<String, OrdSet<String>>,
    /// Maximum id draws before a mint gives up
    max_id_attempts: u32,
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenRegistry {
    /// Create an empty registry with the default retry ceiling
    pub fn new() -> Self {
        Self::with_max_id_attempts(DEFAULT_MAX_ID_ATTEMPTS)
    }

    /// Create an empty registry with a custom retry ceiling (at least 1)
    pub fn with_max_id_attempts(max_id_attempts: u32) -> Self {
        Self {
            tokens: OrdMap::new(),
            by_owner: OrdMap::new(),
            max_id_attempts: max_id_attempts.max(1),
        }
    }

    pub fn max_id_attempts(&self) -> u32 {
        self.max_id_attempts
    }

    /// Mint a new token to a registered holder
    ///
    /// Nothing is inserted unless every check passes.
    pub fn mint(
        &mut self,
        holders: &HolderRegistry,
        ids: &mut dyn IdSource,
        owner: &str,
    ) -> Result<Token, TokenError> {
        if !holders.exists(owner) {
            return Err(TokenError::HolderNotFound(owner.to_string()));
        }

        let id = draw_unique_id::<TokenError>(ids, self.max_id_attempts, |candidate| {
            Ok(self.tokens.contains_key(candidate))
        })?;
        let token = Token::new(id, owner.to_string());
        self.insert(token.clone());

        log::info!("Token minted: {} -> {}", token.id, token.owner);

        Ok(token)
    }

    /// Move a token to a new registered owner
    ///
    /// Transferring to the current owner succeeds without changes.
    pub fn transfer(
        &mut self,
        holders: &HolderRegistry,
        token_id: &str,
        new_owner: &str,
    ) -> Result<(), TokenError> {
        let token = self
            .tokens
            .get(token_id)
            .ok_or_else(|| TokenError::TokenNotFound(token_id.to_string()))?;

        if !holders.exists(new_owner) {
            return Err(TokenError::HolderNotFound(new_owner.to_string()));
        }

        if token.owner == new_owner {
            return Ok(());
        }

        let previous = token.owner.clone();
        self.unindex(&previous, token_id);
        self.index(new_owner, token_id);
        self.tokens.insert(
            token_id.to_string(),
            Token::new(token_id.to_string(), new_owner.to_string()),
        );

        log::info!("Token transferred: {} {} -> {}", token_id, previous, new_owner);

        Ok(())
    }

    /// All tokens currently owned by `owner`, in ascending id order
    ///
    /// Unknown holders simply own nothing.
    pub fn list_by_owner(&self, owner: &str) -> Vec<Token> {
        let tokens: Vec<Token> = self
            .by_owner
            .get(owner)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.tokens.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        log::debug!("Listed {} token(s) for {}", tokens.len(), owner);
        tokens
    }

    /// Insert a token record and index it under its owner
    ///
    /// Returns `false` and changes nothing if the id is already present.
    /// Does not check that the owner is registered.
    pub(crate) fn insert(&mut self, token: Token) -> bool {
        if self.tokens.contains_key(&token.id) {
            return false;
        }
        self.index(&token.owner, &token.id);
        self.tokens.insert(token.id.clone(), token);
        true
    }

    fn index(&mut self, owner: &str, token_id: &str) {
        let mut ids = self.by_owner.get(owner).cloned().unwrap_or_default();
        ids.insert(token_id.to_string());
        self.by_owner.insert(owner.to_string(), ids);
    }

    fn unindex(&mut self, owner: &str, token_id: &str) {
        let Some(mut ids) = self.by_owner.get(owner).cloned() else {
            return;
        };
        ids.remove(token_id);
        if ids.is_empty() {
            self.by_owner.remove(owner);
        } else {
            self.by_owner.insert(owner.to_string(), ids);
        }
    }

    /// Get a token by id
    pub fn get(&self, token_id: &str) -> Option<&Token> {
        self.tokens.get(token_id)
    }

    /// Check if a token exists
    pub fn contains(&self, token_id: &str) -> bool {
        self.tokens.contains_key(token_id)
    }

    /// Iterate over all tokens in id order
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether both registries point at the same map roots
    #[cfg(test)]
    pub(crate) fn shares_storage_with(&self, other: &Self) -> bool {
        self.tokens.ptr_eq(&other.tokens) && self.by_owner.ptr_eq(&other.by_owner)
    }
}

/// Draw ids until one is well-formed and not taken, up to `max_attempts`
///
/// `is_taken` reports whether a candidate is already in use. Malformed
/// candidates are discarded and count toward the ceiling.
pub(crate) fn draw_unique_id<E>(
    ids: &mut dyn IdSource,
    max_attempts: u32,
    mut is_taken: impl FnMut(&str) -> Result<bool, E>,
) -> Result<String, E>
where
    E: From<TokenError>,
{
    for attempt in 1..=max_attempts {
        let candidate = ids.next_id().map_err(|e| {
            log::error!("Token id generation failed: {}", e);
            E::from(TokenError::Entropy(e))
        })?;

        if !is_valid_token_id(&candidate) {
            log::warn!(
                "Discarding malformed token id {:?} (attempt {})",
                candidate,
                attempt
            );
            continue;
        }

        if is_taken(&candidate)? {
            log::warn!("Token id collision on {} (attempt {})", candidate, attempt);
            continue;
        }

        return Ok(candidate);
    }

    log::warn!("Giving up on token id after {} attempts", max_attempts);
    Err(E::from(TokenError::IdExhausted {
        attempts: max_attempts,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{EntropyError, OsIdGenerator};
    use std::collections::VecDeque;

    /// Replays a fixed list of ids, then reports entropy failure
    struct ScriptedIds(VecDeque<String>);

    impl ScriptedIds {
        fn new(ids: &[&str]) -> Self {
            Self(ids.iter().map(|s| s.to_string()).collect())
        }
    }

    impl IdSource for ScriptedIds {
        fn next_id(&mut self) -> Result<String, EntropyError> {
            self.0
                .pop_front()
                .ok_or_else(|| EntropyError::new("script exhausted"))
        }
    }

    fn holders(names: &[&str]) -> HolderRegistry {
        let mut registry = HolderRegistry::new();
        for name in names {
            registry.register(name).unwrap();
        }
        registry
    }

    #[test]
    fn test_registry_creation() {
        let registry = TokenRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.max_id_attempts(), DEFAULT_MAX_ID_ATTEMPTS);
    }

    #[test]
    fn test_zero_ceiling_is_raised() {
        let registry = TokenRegistry::with_max_id_attempts(0);
        assert_eq!(registry.max_id_attempts(), 1);
    }

    #[test]
    fn test_mint() {
        let holders = holders(&["alice"]);
        let mut registry = TokenRegistry::new();
        let mut ids = OsIdGenerator::new();

        let token = registry.mint(&holders, &mut ids, "alice").unwrap();

        assert_eq!(token.owner, "alice");
        assert!(is_valid_token_id(&token.id));
        assert_eq!(registry.get(&token.id), Some(&token));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_mint_unknown_holder() {
        let holders = holders(&["alice"]);
        let mut registry = TokenRegistry::new();
        let mut ids = OsIdGenerator::new();

        let result = registry.mint(&holders, &mut ids, "Unregistered");

        assert!(matches!(result, Err(TokenError::HolderNotFound(name)) if name == "Unregistered"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_mint_retries_on_collision() {
        let holders = holders(&["alice"]);
        let mut registry = TokenRegistry::new();
        let mut ids = ScriptedIds::new(&["aaaaaaaaaa", "aaaaaaaaaa", "bbbbbbbbbb"]);

        let first = registry.mint(&holders, &mut ids, "alice").unwrap();
        let second = registry.mint(&holders, &mut ids, "alice").unwrap();

        assert_eq!(first.id, "aaaaaaaaaa");
        assert_eq!(second.id, "bbbbbbbbbb");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_mint_skips_malformed_ids() {
        let holders = holders(&["alice"]);
        let mut registry = TokenRegistry::new();
        let mut ids = ScriptedIds::new(&["NOT-HEX!!!", "0123456789"]);

        let token = registry.mint(&holders, &mut ids, "alice").unwrap();
        assert_eq!(token.id, "0123456789");
    }

    #[test]
    fn test_mint_id_exhausted() {
        let holders = holders(&["alice"]);
        let mut registry = TokenRegistry::with_max_id_attempts(3);
        let mut ids = ScriptedIds::new(&["aaaaaaaaaa", "aaaaaaaaaa", "aaaaaaaaaa", "aaaaaaaaaa"]);

        registry.mint(&holders, &mut ids, "alice").unwrap();
        let result = registry.mint(&holders, &mut ids, "alice");

        assert!(matches!(result, Err(TokenError::IdExhausted { attempts: 3 })));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_mint_entropy_failure() {
        let holders = holders(&["alice"]);
        let mut registry = TokenRegistry::new();
        let mut ids = ScriptedIds::new(&[]);

        let result = registry.mint(&holders, &mut ids, "alice");

        assert!(matches!(result, Err(TokenError::Entropy(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_transfer() {
        let holders = holders(&["alice", "bob"]);
        let mut registry = TokenRegistry::new();
        let mut ids = ScriptedIds::new(&["1111111111", "2222222222"]);

        let t1 = registry.mint(&holders, &mut ids, "alice").unwrap();
        let t2 = registry.mint(&holders, &mut ids, "bob").unwrap();

        registry.transfer(&holders, &t2.id, "alice").unwrap();

        assert_eq!(registry.list_by_owner("alice"), vec![
            t1.clone(),
            Token::new(t2.id.clone(), "alice".to_string()),
        ]);
        assert!(registry.list_by_owner("bob").is_empty());
        assert_eq!(registry.get(&t1.id), Some(&t1));
    }

    #[test]
    fn test_transfer_unknown_token() {
        let holders = holders(&["alice"]);
        let mut registry = TokenRegistry::new();
        let mut ids = OsIdGenerator::new();
        let token = registry.mint(&holders, &mut ids, "alice").unwrap();

        let result = registry.transfer(&holders, "nonexistent-id", "alice");

        assert!(matches!(result, Err(TokenError::TokenNotFound(_))));
        assert_eq!(registry.list_by_owner("alice"), vec![token]);
    }

    #[test]
    fn test_transfer_unknown_holder_keeps_owner() {
        let holders = holders(&["alice"]);
        let mut registry = TokenRegistry::new();
        let mut ids = OsIdGenerator::new();
        let token = registry.mint(&holders, &mut ids, "alice").unwrap();

        let result = registry.transfer(&holders, &token.id, "mallory");

        assert!(matches!(result, Err(TokenError::HolderNotFound(_))));
        assert_eq!(registry.get(&token.id).unwrap().owner, "alice");
        assert!(registry.list_by_owner("mallory").is_empty());
    }

    #[test]
    fn test_transfer_to_current_owner() {
        let holders = holders(&["alice"]);
        let mut registry = TokenRegistry::new();
        let mut ids = OsIdGenerator::new();
        let token = registry.mint(&holders, &mut ids, "alice").unwrap();

        registry.transfer(&holders, &token.id, "alice").unwrap();

        assert_eq!(registry.list_by_owner("alice"), vec![token]);
    }

    #[test]
    fn test_list_by_owner_sorted_by_id() {
        let holders = holders(&["alice"]);
        let mut registry = TokenRegistry::new();
        let mut ids = ScriptedIds::new(&["cccccccccc", "aaaaaaaaaa", "bbbbbbbbbb"]);

        for _ in 0..3 {
            registry.mint(&holders, &mut ids, "alice").unwrap();
        }

        let listed: Vec<String> = registry
            .list_by_owner("alice")
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(listed, vec!["aaaaaaaaaa", "bbbbbbbbbb", "cccccccccc"]);
    }

    #[test]
    fn test_clone_is_isolated_from_later_mints() {
        let holders = holders(&["alice", "bob"]);
        let mut registry = TokenRegistry::new();
        let mut ids = ScriptedIds::new(&["1111111111", "2222222222"]);
        let first = registry.mint(&holders, &mut ids, "alice").unwrap();

        let copy = registry.clone();
        assert!(copy.shares_storage_with(&registry));

        registry.mint(&holders, &mut ids, "alice").unwrap();
        registry.transfer(&holders, &first.id, "bob").unwrap();

        assert!(!copy.shares_storage_with(&registry));
        assert_eq!(copy.list_by_owner("alice"), vec![first]);
        assert!(copy.list_by_owner("bob").is_empty());
        assert_eq!(registry.list_by_owner("alice").len(), 1);
        assert_eq!(registry.list_by_owner("bob").len(), 1);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut registry = TokenRegistry::new();

        assert!(registry.insert(Token::new("aaaaaaaaaa".to_string(), "alice".to_string())));
        assert!(!registry.insert(Token::new("aaaaaaaaaa".to_string(), "bob".to_string())));
        assert_eq!(registry.get("aaaaaaaaaa").unwrap().owner, "alice");
        assert!(registry.list_by_owner("bob").is_empty());
    }

    #[test]
    fn test_list_unknown_holder_is_empty() {
        let registry = TokenRegistry::new();
        assert!(registry.list_by_owner("nobody").is_empty());
    }
}
