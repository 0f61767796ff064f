// crates/spaceboard-harness/src/config/model.rs
// ============================================================================
// Module: Harness Configuration Model
// Description: Typed configuration, credentials, and loading rules.
// Purpose: Merge the optional TOML file with environment overrides.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! [`HarnessConfig::load`] reads `SPACEBOARD_CREDENTIALS_FILE` (when set),
//! then applies environment overrides field by field. A credential is only
//! accepted once both its email and password are known.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::env::HarnessEnv;
use super::env::parse_timeout_seconds;
use super::env::read_env_nonempty;
use super::env::timeout_from_secs;
use crate::roles::Role;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was not valid UTF-8.
    #[error("{0} must be valid UTF-8")]
    InvalidUtf8(String),
    /// An environment variable was set but empty.
    #[error("{0} must not be empty")]
    Empty(String),
    /// A timeout value was invalid.
    #[error("{name} {reason}")]
    InvalidTimeout {
        /// Setting name.
        name: String,
        /// Validation failure reason.
        reason: String,
    },
    /// The API URL was not an absolute http(s) URL.
    #[error("invalid api url {value}: {reason}")]
    InvalidUrl {
        /// Offending value.
        value: String,
        /// Validation failure reason.
        reason: String,
    },
    /// No API URL was configured anywhere.
    #[error("api url is not configured; set SPACEBOARD_API_URL")]
    MissingApiUrl,
    /// Only one half of a credential was configured.
    #[error("credential for role {role} is missing {missing}")]
    IncompleteCredential {
        /// Role with the partial credential.
        role: Role,
        /// Missing field name.
        missing: &'static str,
    },
    /// The credentials file named an unknown role.
    #[error("unknown role in credentials file: {0}")]
    UnknownRole(String),
    /// The credentials file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// File path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The credentials file was not valid TOML for this schema.
    #[error("failed to parse {path}: {reason}")]
    ParseFile {
        /// File path.
        path: PathBuf,
        /// Parse failure reason.
        reason: String,
    },
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Login credential for one role.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Role this credential authenticates.
    pub role: Role,
    /// Login email.
    pub email: String,
    /// Login password.
    pub password: String,
}

impl Credential {
    /// Creates a credential.
    #[must_use]
    pub fn new(role: Role, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            role,
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("role", &self.role)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where structured harness events are written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventLogTarget {
    /// Events are discarded.
    #[default]
    Off,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to a file.
    File(PathBuf),
}

impl EventLogTarget {
    /// Parses `off`, `stderr`, or a file path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("off") || trimmed.eq_ignore_ascii_case("none") {
            Self::Off
        } else if trimmed.eq_ignore_ascii_case("stderr") {
            Self::Stderr
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for EventLogTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::Stderr => f.write_str("stderr"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Typed harness configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Backend base URL.
    pub api_url: Url,
    /// Credentials by role.
    pub credentials: BTreeMap<Role, Credential>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Event sink selection.
    pub event_log: EventLogTarget,
}

/// On-disk credentials file layout.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    /// Optional backend base URL.
    api_url: Option<String>,
    /// Optional timeout in seconds.
    timeout_sec: Option<u64>,
    /// Credentials keyed by role label.
    #[serde(default)]
    credentials: BTreeMap<String, FileCredential>,
}

/// Credential entry in the credentials file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileCredential {
    /// Login email.
    email: Option<String>,
    /// Login password.
    password: Option<String>,
}

impl HarnessConfig {
    /// Creates a configuration for `api_url` with no credentials.
    ///
    /// # Errors
    ///
    /// Returns an error when `api_url` is not an absolute http(s) URL.
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            credentials: BTreeMap::new(),
            timeout: DEFAULT_TIMEOUT,
            event_log: EventLogTarget::Off,
        })
    }

    /// Adds or replaces a credential.
    #[must_use]
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credentials.insert(credential.role, credential);
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the credential for `role`, if configured.
    #[must_use]
    pub fn credential(&self, role: Role) -> Option<&Credential> {
        self.credentials.get(&role)
    }

    /// Loads configuration from the environment and optional credentials file.
    ///
    /// # Errors
    ///
    /// Returns an error when a value is not valid UTF-8, is empty, fails
    /// validation, or when the credentials file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match read_env_nonempty(HarnessEnv::CredentialsFile.as_str())? {
            Some(path) => read_config_file(Path::new(&path))?,
            None => FileConfig::default(),
        };

        let api_url = read_env_nonempty(HarnessEnv::ApiUrl.as_str())?
            .or(file.api_url)
            .ok_or(ConfigError::MissingApiUrl)?;
        let api_url = parse_api_url(&api_url)?;

        let timeout = match read_env_nonempty(HarnessEnv::TimeoutSeconds.as_str())? {
            Some(raw) => parse_timeout_seconds(HarnessEnv::TimeoutSeconds.as_str(), &raw)?,
            None => match file.timeout_sec {
                Some(secs) => timeout_from_secs("timeout_sec", secs)?,
                None => DEFAULT_TIMEOUT,
            },
        };

        let mut partial: BTreeMap<Role, FileCredential> = BTreeMap::new();
        for (label, entry) in file.credentials {
            let role: Role = label.parse().map_err(|_| ConfigError::UnknownRole(label.clone()))?;
            partial.insert(role, entry);
        }
        for role in Role::ALL {
            let email = read_env_nonempty(&HarnessEnv::email_for(role))?;
            let password = read_env_nonempty(&HarnessEnv::password_for(role))?;
            if email.is_none() && password.is_none() {
                continue;
            }
            let entry = partial.entry(role).or_default();
            if email.is_some() {
                entry.email = email;
            }
            if password.is_some() {
                entry.password = password;
            }
        }

        let mut credentials = BTreeMap::new();
        for (role, entry) in partial {
            let credential = match (entry.email, entry.password) {
                (Some(email), Some(password)) => Credential::new(role, email, password),
                (None, _) => {
                    return Err(ConfigError::IncompleteCredential {
                        role,
                        missing: "email",
                    });
                }
                (_, None) => {
                    return Err(ConfigError::IncompleteCredential {
                        role,
                        missing: "password",
                    });
                }
            };
            credentials.insert(role, credential);
        }

        let event_log = read_env_nonempty(HarnessEnv::EventLog.as_str())?
            .map_or(EventLogTarget::Off, |raw| EventLogTarget::parse(&raw));

        Ok(Self {
            api_url,
            credentials,
            timeout,
            event_log,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses and validates the backend base URL.
///
/// # Errors
///
/// Returns an error for unparseable, relative, or non-http(s) URLs.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|err| ConfigError::InvalidUrl {
        value: trimmed.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            value: trimmed.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}

/// Reads and parses the TOML credentials file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or does not match the schema.
fn read_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|err| ConfigError::ParseFile {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}
