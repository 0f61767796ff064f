// crates/spaceboard-harness/src/fixtures/guard.rs
// ============================================================================
// Module: Resource Guard
// Description: Create-on-construct, remove-on-drop ownership of one resource.
// Purpose: Guarantee idempotent, non-panicking teardown on every exit path.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`ResourceGuard`] is the shared core of every `Temp*` fixture. It records
//! lifecycle transitions to the client's event sink and remembers the first
//! teardown outcome so repeated teardown calls, including the one from
//! `Drop`, are no-ops.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::PoisonError;

use crate::client::ApiResponse;
use crate::client::SessionClient;
use crate::endpoints::DescriptorError;
use crate::endpoints::EndpointDescriptor;
use crate::endpoints::FieldSet;
use crate::endpoints::Operation;
use crate::endpoints::Scope;
use crate::endpoints::build_descriptor;
use crate::error::HarnessError;
use crate::events::FixtureEvent;
use crate::events::FixturePhase;
use crate::fixtures::kind::ResourceId;
use crate::fixtures::kind::ResourceKind;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Status every creation call must return.
const CREATED_STATUS: u16 = 200;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of a teardown attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeardownOutcome {
    /// The backend removed or archived the resource.
    Removed,
    /// The resource no longer existed.
    AlreadyGone,
    /// The teardown call failed; the failure was logged.
    Failed(String),
    /// Teardown already ran for this guard.
    AlreadyTornDown,
}

impl TeardownOutcome {
    /// Returns the matching fixture phase.
    const fn phase(&self) -> FixturePhase {
        match self {
            Self::Removed | Self::AlreadyTornDown => FixturePhase::Removed,
            Self::AlreadyGone => FixturePhase::AlreadyGone,
            Self::Failed(_) => FixturePhase::TeardownFailed,
        }
    }
}

// ============================================================================
// SECTION: Guard
// ============================================================================

/// Owns one created resource until it is torn down.
#[derive(Debug)]
pub struct ResourceGuard {
    /// Resource kind.
    kind: ResourceKind,
    /// Backend identifier.
    id: ResourceId,
    /// Owning space, for tenant-scoped kinds.
    space_id: Option<String>,
    /// Client authenticated as the creating role.
    client: SessionClient,
    /// Outcome of the first teardown, once it ran.
    outcome: Mutex<Option<TeardownOutcome>>,
}

impl ResourceGuard {
    /// Sends `descriptor` and takes ownership of the created resource.
    ///
    /// `space_id` is the owning space; a created space owns itself.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::SetupFailed`] when the status is not 200 and
    /// [`HarnessError::MissingResourceId`] when `payload._id` is absent. No
    /// guard exists in either case, so nothing is torn down.
    pub fn create(
        kind: ResourceKind,
        client: SessionClient,
        space_id: Option<&str>,
        descriptor: &EndpointDescriptor,
    ) -> Result<(Self, ApiResponse), HarnessError> {
        let sink = client.sink();
        let operation = descriptor.operation().spec().name;
        sink.record_fixture(
            &FixtureEvent::new(kind.label(), FixturePhase::Creating).with_ids(None, space_id),
        );
        let response = match client.send(descriptor) {
            Ok(response) => response,
            Err(err) => {
                sink.record_fixture(
                    &FixtureEvent::new(kind.label(), FixturePhase::SetupFailed)
                        .with_ids(None, space_id)
                        .with_detail(err.to_string()),
                );
                return Err(err);
            }
        };
        if response.status() != CREATED_STATUS {
            sink.record_fixture(
                &FixtureEvent::new(kind.label(), FixturePhase::SetupFailed)
                    .with_ids(None, space_id)
                    .with_detail(format!("status {}", response.status())),
            );
            return Err(HarnessError::SetupFailed {
                operation,
                expected: CREATED_STATUS,
                status: response.status(),
                body: response.text().to_string(),
            });
        }
        let Some(id) = response.id().and_then(ResourceId::new) else {
            sink.record_fixture(
                &FixtureEvent::new(kind.label(), FixturePhase::SetupFailed)
                    .with_ids(None, space_id)
                    .with_detail("missing payload._id"),
            );
            return Err(HarnessError::MissingResourceId {
                operation,
                body: response.text().to_string(),
            });
        };
        let space_id = match kind {
            ResourceKind::Space => Some(id.as_str().to_string()),
            _ => space_id.map(ToString::to_string),
        };
        sink.record_fixture(
            &FixtureEvent::new(kind.label(), FixturePhase::Ready)
                .with_ids(Some(id.as_str()), space_id.as_deref()),
        );
        let guard = Self {
            kind,
            id,
            space_id,
            client,
            outcome: Mutex::new(None),
        };
        Ok((guard, response))
    }

    /// Returns the resource kind.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Returns the backend identifier.
    #[must_use]
    pub const fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Returns the owning space.
    #[must_use]
    pub fn space_id(&self) -> Option<&str> {
        self.space_id.as_deref()
    }

    /// Returns the client the resource was created with.
    #[must_use]
    pub const fn client(&self) -> &SessionClient {
        &self.client
    }

    /// Builds a descriptor for `operation` addressed to this resource.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] when the operation does not take `_id`.
    pub fn addressed(&self, operation: Operation) -> Result<EndpointDescriptor, DescriptorError> {
        let space_id = match operation.spec().scope {
            Scope::Tenant => self.space_id.as_deref(),
            Scope::Global => None,
        };
        build_descriptor(operation, space_id, FieldSet::new().set("_id", self.id.as_str()))
    }

    /// Reads the resource back with its `get_*` operation.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on descriptor or transport failure.
    pub fn fetch(&self) -> Result<ApiResponse, HarnessError> {
        let descriptor = self.addressed(self.kind.fetch_operation())?;
        self.client.send(&descriptor)
    }

    /// Returns the first teardown outcome, once teardown ran.
    #[must_use]
    pub fn outcome(&self) -> Option<TeardownOutcome> {
        self.outcome.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Removes the resource; later calls return [`TeardownOutcome::AlreadyTornDown`].
    pub fn teardown(&self) -> TeardownOutcome {
        let mut outcome = self.outcome.lock().unwrap_or_else(PoisonError::into_inner);
        if outcome.is_some() {
            return TeardownOutcome::AlreadyTornDown;
        }
        let result = self.remove();
        *outcome = Some(result.clone());
        result
    }

    /// Issues the teardown call and classifies the response.
    fn remove(&self) -> TeardownOutcome {
        let sink = self.client.sink();
        let event = |phase| {
            FixtureEvent::new(self.kind.label(), phase)
                .with_ids(Some(self.id.as_str()), self.space_id.as_deref())
        };
        sink.record_fixture(&event(FixturePhase::TearingDown));
        let outcome = match self.addressed(self.kind.teardown_operation()) {
            Err(err) => TeardownOutcome::Failed(err.to_string()),
            Ok(descriptor) => match self.client.send(&descriptor) {
                Err(err) => TeardownOutcome::Failed(err.to_string()),
                Ok(response) if response.is_not_found() => TeardownOutcome::AlreadyGone,
                Ok(response) if response.is_success() && response.error_code().is_none() => {
                    TeardownOutcome::Removed
                }
                Ok(response) => TeardownOutcome::Failed(format!(
                    "status {}: {}",
                    response.status(),
                    response.text()
                )),
            },
        };
        let mut finished = event(outcome.phase());
        if let TeardownOutcome::Failed(detail) = &outcome {
            finished = finished.with_detail(detail.clone());
        }
        sink.record_fixture(&finished);
        outcome
    }
}

impl Drop for ResourceGuard {
    fn drop(&mut self) {
        let _ = self.teardown();
    }
}

// ============================================================================
// SECTION: Fixture Trait
// ============================================================================

/// Accessors shared by every `Temp*` fixture.
pub trait Fixture {
    /// Returns the underlying guard.
    fn guard(&self) -> &ResourceGuard;

    /// Returns the backend identifier.
    fn id(&self) -> &str {
        self.guard().id().as_str()
    }

    /// Returns the owning space.
    fn space_id(&self) -> Option<&str> {
        self.guard().space_id()
    }

    /// Returns the client the resource was created with.
    fn client(&self) -> &SessionClient {
        self.guard().client()
    }

    /// Reads the resource back.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on descriptor or transport failure.
    fn fetch(&self) -> Result<ApiResponse, HarnessError> {
        self.guard().fetch()
    }

    /// Tears the resource down now instead of on drop.
    fn teardown(&self) -> TeardownOutcome {
        self.guard().teardown()
    }
}
