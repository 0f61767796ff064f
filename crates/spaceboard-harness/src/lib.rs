// crates/spaceboard-harness/src/lib.rs
// ============================================================================
// Module: Spaceboard Harness Library
// Description: Integration-test harness for the Spaceboard backend.
// Purpose: Provide authenticated clients, fixtures, and request descriptors.
// Dependencies: reqwest, serde, serde_json, thiserror, toml, url, rand
// ============================================================================

//! ## Overview
//! This crate hosts the reusable pieces of the Spaceboard integration suite:
//! a blocking [`SessionClient`], a per-role [`TokenCache`] held by an explicit
//! [`HarnessContext`], a declarative table of RPC endpoints with partial-body
//! construction, and RAII resource fixtures that tear tenant data down on
//! every exit path.
//! Invariants:
//! - Omitted optional fields never appear in request bodies; explicit nulls do.
//! - Child fixtures are torn down strictly before their parents.
//! - At most one login per role per context unless the cache is reset.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod config;
pub mod context;
pub mod endpoints;
pub mod error;
pub mod events;
pub mod fixtures;
pub mod names;
pub mod roles;
pub mod tokens;


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use client::ApiResponse;
pub use client::SessionClient;
pub use config::Credential;
pub use config::HarnessConfig;
pub use context::HarnessContext;
pub use endpoints::EndpointDescriptor;
pub use endpoints::FieldSet;
pub use endpoints::Patch;
pub use error::HarnessError;
pub use events::EventSink;
pub use fixtures::Fixture;
pub use fixtures::ResourceGuard;
pub use fixtures::ResourceId;
pub use fixtures::ResourceKind;
pub use fixtures::TeardownOutcome;
pub use fixtures::TempAccessToken;
pub use fixtures::TempBoard;
pub use fixtures::TempDocument;
pub use fixtures::TempProject;
pub use fixtures::TempSpace;
pub use fixtures::TempTask;
pub use roles::AccessMatrix;
pub use roles::Role;
pub use tokens::Token;
pub use tokens::TokenCache;
