// crates/spaceboard-harness/src/endpoints/descriptor.rs
// ============================================================================
// Module: Descriptor Construction
// Description: Partial-body field sets and the generic descriptor builder.
// Purpose: Keep "omitted", "null", and "value" distinct on the wire.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`FieldSet`] records which fields the caller supplied. [`build_descriptor`]
//! validates it against the operation table and produces an immutable
//! [`EndpointDescriptor`]. Construction is pure: equal inputs yield equal
//! descriptors and nothing touches the network.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use super::table::Operation;
use super::table::Scope;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header carrying the tenant space identifier.
pub const SPACE_HEADER: &str = "Current-Space-Id";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Descriptor construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// No operation with this name exists.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    /// A field is not part of the operation's body.
    #[error("{operation} does not accept field {field}")]
    UnknownField {
        /// Operation name.
        operation: &'static str,
        /// Offending field.
        field: String,
    },
    /// A required or nullable field was not supplied.
    #[error("{operation} requires field {field}")]
    MissingField {
        /// Operation name.
        operation: &'static str,
        /// Missing field.
        field: &'static str,
    },
    /// A required field was supplied as null.
    #[error("{operation} field {field} must not be null")]
    NullRequiredField {
        /// Operation name.
        operation: &'static str,
        /// Offending field.
        field: &'static str,
    },
    /// A tenant-scoped operation was built without a space identifier.
    #[error("{operation} is tenant-scoped and needs a space id")]
    MissingSpaceId {
        /// Operation name.
        operation: &'static str,
    },
    /// A global operation was given a space identifier.
    #[error("{operation} runs outside a space and takes no space id")]
    UnexpectedSpaceId {
        /// Operation name.
        operation: &'static str,
    },
}

// ============================================================================
// SECTION: Patch
// ============================================================================

/// Three-state optional field value.
///
/// # Invariants
/// - [`Patch::Omit`] never reaches the wire.
/// - [`Patch::Null`] is sent as JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Field is left out of the body.
    #[default]
    Omit,
    /// Field is sent as an explicit null.
    Null,
    /// Field is sent with this value.
    Set(T),
}

impl<T> Patch<T> {
    /// Returns true for [`Patch::Omit`].
    #[must_use]
    pub const fn is_omitted(&self) -> bool {
        matches!(self, Self::Omit)
    }

    /// Maps `Some(v)` to `Set(v)` and `None` to `Null`.
    #[must_use]
    pub fn nullable(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Set)
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

// ============================================================================
// SECTION: Field Set
// ============================================================================

/// Fields explicitly supplied by the caller, keyed by wire name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    /// Supplied fields; absence means "omitted".
    fields: BTreeMap<String, Value>,
}

impl FieldSet {
    /// Creates an empty field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies `name` with a value.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Supplies `name`, sending `null` for `None`.
    #[must_use]
    pub fn nullable<T: Into<Value>>(mut self, name: &str, value: Option<T>) -> Self {
        self.fields.insert(name.to_string(), value.map_or(Value::Null, Into::into));
        self
    }

    /// Supplies `name` according to the patch state.
    #[must_use]
    pub fn patch<T: Into<Value>>(mut self, name: &str, value: Patch<T>) -> Self {
        match value {
            Patch::Omit => {}
            Patch::Null => {
                self.fields.insert(name.to_string(), Value::Null);
            }
            Patch::Set(value) => {
                self.fields.insert(name.to_string(), value.into());
            }
        }
        self
    }

    /// Returns true when `name` was supplied.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the number of supplied fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when nothing was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// SECTION: Descriptor
// ============================================================================

/// Wire-level request description.
///
/// # Invariants
/// - Constructed only through [`build_descriptor`]; never mutated in place.
/// - `json` is `None` only for operations with no body fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Operation that produced the descriptor.
    operation: Operation,
    /// JSON body.
    json: Option<Value>,
    /// Request headers.
    headers: BTreeMap<String, String>,
}

impl EndpointDescriptor {
    /// Returns the operation.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the RPC path.
    #[must_use]
    pub fn path(&self) -> &'static str {
        self.operation.spec().path
    }

    /// Returns the JSON body, if any.
    #[must_use]
    pub const fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Returns the request headers.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Returns the tenant space identifier, when scoped.
    #[must_use]
    pub fn space_id(&self) -> Option<&str> {
        self.headers.get(SPACE_HEADER).map(String::as_str)
    }

    /// Returns a copy with an extra or replaced header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Builds a descriptor for an operation looked up by name.
///
/// # Errors
///
/// Returns [`DescriptorError::UnknownOperation`] for unknown names, otherwise
/// the errors of [`build_descriptor`].
pub fn build_by_name(
    name: &str,
    space_id: Option<&str>,
    fields: FieldSet,
) -> Result<EndpointDescriptor, DescriptorError> {
    let operation =
        Operation::from_name(name).ok_or_else(|| DescriptorError::UnknownOperation(name.to_string()))?;
    build_descriptor(operation, space_id, fields)
}

/// Builds a descriptor, enforcing the operation's field and scope contract.
///
/// # Errors
///
/// Returns [`DescriptorError`] when a field is unknown, a required or
/// nullable field is missing, a required field is null, or the space id does
/// not match the operation's scope.
pub fn build_descriptor(
    operation: Operation,
    space_id: Option<&str>,
    fields: FieldSet,
) -> Result<EndpointDescriptor, DescriptorError> {
    let spec = operation.spec();
    for &field in spec.required {
        match fields.fields.get(field) {
            None => {
                return Err(DescriptorError::MissingField {
                    operation: spec.name,
                    field,
                });
            }
            Some(Value::Null) => {
                return Err(DescriptorError::NullRequiredField {
                    operation: spec.name,
                    field,
                });
            }
            Some(_) => {}
        }
    }
    if let Some(field) = spec.nullable.iter().copied().find(|field| !fields.contains(field)) {
        return Err(DescriptorError::MissingField {
            operation: spec.name,
            field,
        });
    }
    assemble(operation, space_id, fields)
}

/// Builds a descriptor that may leave required fields out or send them as
/// null, for exercising backend validation.
///
/// Field names and scope are still checked.
///
/// # Errors
///
/// Returns [`DescriptorError`] when a field is unknown or the space id does
/// not match the operation's scope.
pub fn build_unchecked(
    operation: Operation,
    space_id: Option<&str>,
    fields: FieldSet,
) -> Result<EndpointDescriptor, DescriptorError> {
    assemble(operation, space_id, fields)
}

/// Checks field names and scope, then assembles the body and headers.
fn assemble(
    operation: Operation,
    space_id: Option<&str>,
    fields: FieldSet,
) -> Result<EndpointDescriptor, DescriptorError> {
    let spec = operation.spec();

    if let Some(field) = fields.fields.keys().find(|field| !spec.accepts(field)) {
        return Err(DescriptorError::UnknownField {
            operation: spec.name,
            field: field.clone(),
        });
    }

    let mut headers = BTreeMap::new();
    match (spec.scope, space_id) {
        (Scope::Tenant, Some(space_id)) => {
            headers.insert(SPACE_HEADER.to_string(), space_id.to_string());
        }
        (Scope::Tenant, None) => {
            return Err(DescriptorError::MissingSpaceId {
                operation: spec.name,
            });
        }
        (Scope::Global, Some(_)) => {
            return Err(DescriptorError::UnexpectedSpaceId {
                operation: spec.name,
            });
        }
        (Scope::Global, None) => {}
    }

    let json = if spec.is_bodyless() {
        None
    } else {
        Some(Value::Object(fields.fields.into_iter().collect::<Map<String, Value>>()))
    };

    Ok(EndpointDescriptor {
        operation,
        json,
        headers,
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
