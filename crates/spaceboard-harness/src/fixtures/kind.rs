// crates/spaceboard-harness/src/fixtures/kind.rs
// ============================================================================
// Module: Resource Kinds
// Description: Resource identifiers and per-kind operation mapping.
// Dependencies: none
// ============================================================================

//! Maps every fixture-managed resource kind to the operations that create,
//! fetch, and remove it.

use std::fmt;

use crate::endpoints::Operation;

/// Backend `_id` of a fixture-managed resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// Wraps a backend identifier; returns `None` when blank.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() { None } else { Some(Self(raw)) }
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of fixture-managed resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Tenant space.
    Space,
    /// Project inside a space.
    Project,
    /// Board inside a project.
    Board,
    /// Document inside a project.
    Document,
    /// Task on a board.
    Task,
    /// Personal access token of a user.
    PersonalAccessToken,
}

impl ResourceKind {
    /// Every kind, parents before children.
    pub const ALL: [Self; 6] = [
        Self::Space,
        Self::Project,
        Self::Board,
        Self::Document,
        Self::Task,
        Self::PersonalAccessToken,
    ];

    /// Returns the label used in events.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Space => "space",
            Self::Project => "project",
            Self::Board => "board",
            Self::Document => "document",
            Self::Task => "task",
            Self::PersonalAccessToken => "personal_access_token",
        }
    }

    /// Operation that creates this kind.
    #[must_use]
    pub const fn create_operation(self) -> Operation {
        match self {
            Self::Space => Operation::CreateSpace,
            Self::Project => Operation::CreateProject,
            Self::Board => Operation::CreateBoard,
            Self::Document => Operation::CreateDocument,
            Self::Task => Operation::CreateTask,
            Self::PersonalAccessToken => Operation::CreatePersonalAccessToken,
        }
    }

    /// Operation that reads one resource of this kind by `_id`.
    #[must_use]
    pub const fn fetch_operation(self) -> Operation {
        match self {
            Self::Space => Operation::GetSpace,
            Self::Project => Operation::GetProject,
            Self::Board => Operation::GetBoard,
            Self::Document => Operation::GetDocument,
            Self::Task => Operation::GetTask,
            Self::PersonalAccessToken => Operation::GetPersonalAccessToken,
        }
    }

    /// Operation that removes or archives this kind.
    #[must_use]
    pub const fn teardown_operation(self) -> Operation {
        match self {
            Self::Space => Operation::RemoveSpace,
            Self::Project => Operation::ArchiveProject,
            Self::Board => Operation::ArchiveBoard,
            Self::Document => Operation::RemoveDocument,
            Self::Task => Operation::RemoveTask,
            Self::PersonalAccessToken => Operation::RemovePersonalAccessToken,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
