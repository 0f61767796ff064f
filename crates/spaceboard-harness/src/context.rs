// crates/spaceboard-harness/src/context.rs
// ============================================================================
// Module: Harness Context
// Description: Explicit owner of configuration, token cache, and event sink.
// Purpose: Resolve roles to authenticated clients without process globals.
// Dependencies: reqwest, url
// ============================================================================

//! ## Overview
//! A [`HarnessContext`] is the entry point every test receives. It owns the
//! [`HarnessConfig`], a [`TokenCache`], and the [`EventSink`] that clients and
//! fixtures report to. Two contexts never share tokens, so tests on parallel
//! threads can each hold their own.
//!
//! Login contract: `POST /Login {email, password}` must answer 200; the token
//! is read from `payload.token`, falling back to the `_t` cookie.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::client::SESSION_COOKIE;
use crate::client::SessionClient;
use crate::config::HarnessConfig;
use crate::endpoints::login_endpoint;
use crate::error::HarnessError;
use crate::events::AuthEvent;
use crate::events::EventSink;
use crate::events::NoopEventSink;
use crate::events::sink_for;
use crate::fixtures::TempBoard;
use crate::fixtures::TempProject;
use crate::fixtures::TempSpace;
use crate::roles::Role;
use crate::tokens::Token;
use crate::tokens::TokenCache;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Configuration, token cache, and event sink for one test scope.
pub struct HarnessContext {
    /// Backend URL, credentials, and timeouts.
    config: HarnessConfig,
    /// Per-role session tokens.
    tokens: TokenCache,
    /// Destination for structured events.
    sink: Arc<dyn EventSink>,
}

impl HarnessContext {
    /// Creates a context that discards events.
    #[must_use]
    pub fn new(config: HarnessConfig) -> Self {
        Self::with_sink(config, Arc::new(NoopEventSink))
    }

    /// Creates a context reporting to `sink`.
    #[must_use]
    pub fn with_sink(config: HarnessConfig, sink: Arc<dyn EventSink>) -> Self {
        Self {
            config,
            tokens: TokenCache::new(),
            sink,
        }
    }

    /// Loads configuration from the environment and opens the configured sink.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Config`] for invalid configuration and
    /// [`HarnessError::EventLog`] when the event log cannot be opened.
    pub fn from_env() -> Result<Self, HarnessError> {
        let config = HarnessConfig::load()?;
        let sink = sink_for(&config.event_log).map_err(|source| HarnessError::EventLog {
            target: config.event_log.to_string(),
            source,
        })?;
        Ok(Self::with_sink(config, sink))
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Returns the event sink.
    #[must_use]
    pub fn sink(&self) -> &Arc<dyn EventSink> {
        &self.sink
    }

    /// Returns the token cache.
    #[must_use]
    pub const fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    /// Builds a client with no session bound.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the HTTP client cannot be built.
    pub fn anonymous_client(&self) -> Result<SessionClient, HarnessError> {
        SessionClient::new(&self.config.api_url, self.config.timeout, Arc::clone(&self.sink))
    }

    /// Builds a client authenticated as `role`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the role cannot be logged in.
    pub fn client(&self, role: Role) -> Result<SessionClient, HarnessError> {
        let token = self.token(role)?;
        let mut client = self.anonymous_client()?;
        client.set_auth_header(&token);
        Ok(client)
    }

    /// Returns the cached token for `role`, logging in on first use.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::MissingCredential`], [`HarnessError::LoginFailed`],
    /// or [`HarnessError::MissingToken`]; nothing is cached on failure.
    pub fn token(&self, role: Role) -> Result<Token, HarnessError> {
        let (token, hit) = self.tokens.get_or_try_insert_with(role, || self.login(role))?;
        if hit {
            self.sink.record_auth(&AuthEvent::new("token_cache_hit", Some(role), None));
        }
        Ok(token)
    }

    /// Evicts `role`, or every role when `None`.
    pub fn reset_token_cache(&self, role: Option<Role>) {
        self.tokens.reset(role);
        self.sink.record_auth(&AuthEvent::new("token_reset", role, None));
    }

    /// Performs one `/Login` round trip for `role`.
    fn login(&self, role: Role) -> Result<Token, HarnessError> {
        let credential =
            self.config.credential(role).ok_or(HarnessError::MissingCredential(role))?;
        let descriptor = login_endpoint(&credential.email, &credential.password)?;
        let response = self.anonymous_client()?.send(&descriptor)?;
        if response.status() != 200 {
            self.sink.record_auth(&AuthEvent::new(
                "login_failed",
                Some(role),
                Some(response.status()),
            ));
            return Err(HarnessError::LoginFailed {
                role,
                status: response.status(),
                body: response.text().to_string(),
            });
        }
        let raw = response
            .payload()
            .and_then(|payload| payload.get("token"))
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string)
            .or_else(|| response.set_cookie(SESSION_COOKIE));
        let Some(token) = raw.and_then(Token::new) else {
            self.sink.record_auth(&AuthEvent::new(
                "login_failed",
                Some(role),
                Some(response.status()),
            ));
            return Err(HarnessError::MissingToken {
                role,
                body: response.text().to_string(),
            });
        };
        self.sink.record_auth(&AuthEvent::new("login", Some(role), Some(response.status())));
        Ok(token)
    }

    // ------------------------------------------------------------------------
    // Fixture chains
    // ------------------------------------------------------------------------

    /// Creates a temporary space owned by `role`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when login or creation fails.
    pub fn temp_space(&self, role: Role) -> Result<Arc<TempSpace>, HarnessError> {
        Ok(Arc::new(TempSpace::create(self, role)?))
    }

    /// Creates a temporary project inside a fresh temporary space.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when login or any creation step fails; a
    /// space created before the failure is torn down.
    pub fn temp_project(&self, role: Role) -> Result<Arc<TempProject>, HarnessError> {
        let space = self.temp_space(role)?;
        Ok(Arc::new(TempProject::create(&space)?))
    }

    /// Creates a temporary board inside a fresh project and space.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when login or any creation step fails;
    /// ancestors created before the failure are torn down.
    pub fn temp_board(&self, role: Role) -> Result<Arc<TempBoard>, HarnessError> {
        let project = self.temp_project(role)?;
        Ok(Arc::new(TempBoard::create(&project)?))
    }
}
