// crates/spaceboard-harness/src/error.rs
// ============================================================================
// Module: Harness Errors
// Description: Error taxonomy for harness setup, auth, and transport.
// Purpose: Surface failures with enough context to diagnose a failed test.
// Dependencies: thiserror, reqwest
// ============================================================================

//! ## Overview
//! Harness errors distinguish transport failures from unexpected backend
//! statuses. Non-2xx responses are never errors at the client layer; they only
//! become errors where the harness itself expects a status (login, fixture
//! setup). Response bodies are carried verbatim so a failing test shows what
//! the backend said.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::config::ConfigError;
use crate::endpoints::DescriptorError;
use crate::roles::Role;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted by the harness.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Passwords and tokens are never embedded in messages.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The HTTP transport failed before a response arrived.
    #[error("http transport failed for {path}: {source}")]
    Transport {
        /// Request path.
        path: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    ClientBuild(String),
    /// A base URL or request path could not be parsed.
    #[error("invalid url {url}: {reason}")]
    InvalidUrl {
        /// Offending URL text.
        url: String,
        /// Parse failure reason.
        reason: String,
    },
    /// A header name or value was not valid HTTP.
    #[error("invalid header {name}: {reason}")]
    InvalidHeader {
        /// Header name.
        name: String,
        /// Validation failure reason.
        reason: String,
    },
    /// No credential is configured for the requested role.
    #[error("no credential configured for role {0}")]
    MissingCredential(Role),
    /// The login endpoint did not return the expected status.
    #[error("login for role {role} returned status {status}: {body}")]
    LoginFailed {
        /// Role being authenticated.
        role: Role,
        /// Observed status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// The login response carried no token.
    #[error("login for role {role} succeeded without a token: {body}")]
    MissingToken {
        /// Role being authenticated.
        role: Role,
        /// Raw response body.
        body: String,
    },
    /// A fixture creation call did not return the expected status.
    #[error("setup {operation} expected status {expected}, got {status}: {body}")]
    SetupFailed {
        /// Operation name.
        operation: &'static str,
        /// Expected status code.
        expected: u16,
        /// Observed status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// A response did not carry the expected status.
    #[error("{operation} expected status {expected}, got {status}: {body}")]
    UnexpectedStatus {
        /// Operation or path label.
        operation: String,
        /// Expected status code.
        expected: u16,
        /// Observed status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// A creation response did not include a resource identifier.
    #[error("{operation} response has no payload._id: {body}")]
    MissingResourceId {
        /// Operation name.
        operation: &'static str,
        /// Raw response body.
        body: String,
    },
    /// The configured event log could not be opened.
    #[error("failed to open event log {target}: {source}")]
    EventLog {
        /// Event log target description.
        target: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An endpoint descriptor could not be built.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    /// Configuration was missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
