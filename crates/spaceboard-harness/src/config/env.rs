// crates/spaceboard-harness/src/config/env.rs
// ============================================================================
// Module: Harness Environment
// Description: Environment keys and strict parsing helpers.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 and empty values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use super::model::ConfigError;
use crate::roles::Role;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for harness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Backend base URL.
    ApiUrl,
    /// Optional TOML file with URL and credentials.
    CredentialsFile,
    /// Optional request timeout in seconds (positive integer).
    TimeoutSeconds,
    /// Event sink selection (`off`, `stderr`, or a file path).
    EventLog,
}

impl HarnessEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiUrl => "SPACEBOARD_API_URL",
            Self::CredentialsFile => "SPACEBOARD_CREDENTIALS_FILE",
            Self::TimeoutSeconds => "SPACEBOARD_TIMEOUT_SEC",
            Self::EventLog => "SPACEBOARD_EVENT_LOG",
        }
    }

    /// Returns the email variable name for `role`.
    #[must_use]
    pub fn email_for(role: Role) -> String {
        format!("SPACEBOARD_{}_EMAIL", role.as_str().to_ascii_uppercase())
    }

    /// Returns the password variable name for `role`.
    #[must_use]
    pub fn password_for(role: Role) -> String {
        format!("SPACEBOARD_{}_PASSWORD", role.as_str().to_ascii_uppercase())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::InvalidUtf8(name.to_string()))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
pub(super) fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty(name.to_string())),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value from a string.
///
/// # Errors
///
/// Returns an error when the value is empty, non-numeric, or zero.
pub(super) fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let trimmed = raw.trim();
    let invalid = || ConfigError::InvalidTimeout {
        name: name.to_string(),
        reason: "must be a positive integer number of seconds".to_string(),
    };
    if trimmed.is_empty() {
        return Err(invalid());
    }
    let secs: u64 = trimmed.parse().map_err(|_| invalid())?;
    timeout_from_secs(name, secs)
}

/// Converts seconds into a timeout, rejecting zero.
///
/// # Errors
///
/// Returns an error when `secs` is zero.
pub(super) fn timeout_from_secs(name: &str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout {
            name: name.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
