// crates/spaceboard-harness/src/tokens.rs
// ============================================================================
// Module: Token Cache
// Description: Per-role session token storage.
// Purpose: Log each role in at most once per harness context.
// Dependencies: none
// ============================================================================

//! ## Overview
//! A [`TokenCache`] maps each [`Role`] to the token its last successful login
//! produced. Entries stay until [`TokenCache::reset`] evicts them.
//! Invariants:
//! - At most one entry per role.
//! - Concurrent callers for the same role observe a single login; the lock is
//!   held across the login closure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::roles::Role;

// ============================================================================
// SECTION: Token
// ============================================================================

/// Opaque, non-empty session token issued by `/Login`.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wraps a raw token; returns `None` for blank input.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() { None } else { Some(Self(raw)) }
    }

    /// Returns the raw token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

// ============================================================================
// SECTION: Cache
// ============================================================================

/// Role → token map shared by every client built from one context.
#[derive(Debug, Default)]
pub struct TokenCache {
    /// Cached tokens keyed by role.
    entries: Mutex<BTreeMap<Role, Token>>,
}

impl TokenCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the map, recovering from a poisoned lock.
    fn entries(&self) -> MutexGuard<'_, BTreeMap<Role, Token>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached token for `role`.
    #[must_use]
    pub fn get(&self, role: Role) -> Option<Token> {
        self.entries().get(&role).cloned()
    }

    /// Returns the cached token, or runs `login` and caches its result.
    ///
    /// The boolean is `true` when the token came from the cache.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `login`; nothing is cached in that case.
    pub fn get_or_try_insert_with<E, F>(&self, role: Role, login: F) -> Result<(Token, bool), E>
    where
        F: FnOnce() -> Result<Token, E>,
    {
        let mut entries = self.entries();
        if let Some(token) = entries.get(&role) {
            return Ok((token.clone(), true));
        }
        let token = login()?;
        entries.insert(role, token.clone());
        Ok((token, false))
    }

    /// Evicts one role, or every role when `role` is `None`.
    pub fn reset(&self, role: Option<Role>) {
        let mut entries = self.entries();
        match role {
            Some(role) => {
                entries.remove(&role);
            }
            None => entries.clear(),
        }
    }

    /// Returns the number of cached roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns true when no role is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
