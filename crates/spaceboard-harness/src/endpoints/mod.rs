// crates/spaceboard-harness/src/endpoints/mod.rs
// ============================================================================
// Module: Endpoint Descriptors
// Description: Declarative RPC operation table and partial-body builders.
// Purpose: Turn domain operations into wire-level request descriptors.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every backend operation is one row of a declarative table: path, tenant
//! scope, and which fields are required, required-but-nullable, or optional.
//! A single routine, [`build_descriptor`], turns a [`FieldSet`] into an
//! [`EndpointDescriptor`] and enforces the partial-body contract uniformly:
//! - an omitted optional field never appears in the body,
//! - an explicit [`Patch::Null`] appears as JSON `null`,
//! - empty collections are sent as given.
//!
//! [`build_unchecked`] skips the presence checks so validation tests can send
//! a required field as `null` or leave it out.
//!
//! The typed functions in [`builders`] sit on top of the table so tests can
//! stay close to the domain vocabulary.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod builders;
mod descriptor;
mod table;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use builders::*;
pub use descriptor::DescriptorError;
pub use descriptor::EndpointDescriptor;
pub use descriptor::FieldSet;
pub use descriptor::Patch;
pub use descriptor::SPACE_HEADER;
pub use descriptor::build_by_name;
pub use descriptor::build_descriptor;
pub use descriptor::build_unchecked;
pub use table::OPERATIONS;
pub use table::Operation;
pub use table::OperationSpec;
pub use table::Scope;
