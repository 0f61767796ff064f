// crates/spaceboard-harness/src/config/mod.rs
// ============================================================================
// Module: Harness Configuration
// Description: Centralized configuration for the Spaceboard harness.
// Purpose: Provide typed access to the backend URL, credentials, and defaults.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! Harness configuration is read from environment variables, optionally
//! layered over a TOML credentials file, and mapped into a typed structure
//! shared by every client the harness builds.
//! Security posture: passwords never appear in `Debug` output or events.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;
mod model;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::HarnessEnv;
pub use env::read_env_strict;
pub use model::ConfigError;
pub use model::Credential;
pub use model::DEFAULT_TIMEOUT;
pub use model::EventLogTarget;
pub use model::HarnessConfig;
