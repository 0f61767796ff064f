// crates/spaceboard-harness/src/endpoints/table.rs
// ============================================================================
// Module: Operation Table
// Description: Declarative description of every backend RPC operation.
// Purpose: Single source of truth for paths, scopes, and field contracts.
// Dependencies: none
// ============================================================================

//! ## Overview
//! [`OPERATIONS`] is indexed by [`Operation`] discriminant. Field names are
//! wire names (`_id`, `projectId`, `typesList`, ...).

// ============================================================================
// SECTION: Types
// ============================================================================

/// Whether an operation runs inside a tenant space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Requires a `Current-Space-Id` header.
    Tenant,
    /// Runs before or outside space selection; no space header.
    Global,
}

/// Static description of one RPC operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    /// Stable operation name.
    pub name: &'static str,
    /// RPC path.
    pub path: &'static str,
    /// Tenant scope.
    pub scope: Scope,
    /// Fields that must be present with a non-null value.
    pub required: &'static [&'static str],
    /// Fields that must be present but may be null.
    pub nullable: &'static [&'static str],
    /// Fields that appear only when supplied.
    pub optional: &'static [&'static str],
}

impl OperationSpec {
    /// Returns true when `field` is part of this operation's body.
    #[must_use]
    pub fn accepts(&self, field: &str) -> bool {
        self.required.contains(&field) || self.nullable.contains(&field) || self.optional.contains(&field)
    }

    /// Returns true when the operation has no body fields at all.
    #[must_use]
    pub const fn is_bodyless(&self) -> bool {
        self.required.is_empty() && self.nullable.is_empty() && self.optional.is_empty()
    }
}

/// Backend RPC operations known to the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `/Login`.
    Login,
    /// `/Logout`.
    Logout,
    /// `/CreateSpace`.
    CreateSpace,
    /// `/GetSpaces`.
    GetSpaces,
    /// `/GetSpace`.
    GetSpace,
    /// `/EditSpace`.
    EditSpace,
    /// `/RemoveSpace`.
    RemoveSpace,
    /// `/CreateProject`.
    CreateProject,
    /// `/GetProject`.
    GetProject,
    /// `/EditProject`.
    EditProject,
    /// `/ArchiveProject`.
    ArchiveProject,
    /// `/CreateBoard`.
    CreateBoard,
    /// `/GetBoard`.
    GetBoard,
    /// `/EditBoard`.
    EditBoard,
    /// `/EditBoardGroup`.
    EditBoardGroup,
    /// `/ArchiveBoard`.
    ArchiveBoard,
    /// `/CreateDocument`.
    CreateDocument,
    /// `/GetDocument`.
    GetDocument,
    /// `/RemoveDocument`.
    RemoveDocument,
    /// `/CreateTask`.
    CreateTask,
    /// `/GetTask`.
    GetTask,
    /// `/EditTask`.
    EditTask,
    /// `/RemoveTask`.
    RemoveTask,
    /// `/CreatePersonalAccessToken`.
    CreatePersonalAccessToken,
    /// `/GetPersonalAccessToken`.
    GetPersonalAccessToken,
    /// `/RemovePersonalAccessToken`.
    RemovePersonalAccessToken,
}

impl Operation {
    /// Every operation, in table order.
    pub const ALL: [Self; 26] = [
        Self::Login,
        Self::Logout,
        Self::CreateSpace,
        Self::GetSpaces,
        Self::GetSpace,
        Self::EditSpace,
        Self::RemoveSpace,
        Self::CreateProject,
        Self::GetProject,
        Self::EditProject,
        Self::ArchiveProject,
        Self::CreateBoard,
        Self::GetBoard,
        Self::EditBoard,
        Self::EditBoardGroup,
        Self::ArchiveBoard,
        Self::CreateDocument,
        Self::GetDocument,
        Self::RemoveDocument,
        Self::CreateTask,
        Self::GetTask,
        Self::EditTask,
        Self::RemoveTask,
        Self::CreatePersonalAccessToken,
        Self::GetPersonalAccessToken,
        Self::RemovePersonalAccessToken,
    ];

    /// Returns the table row for this operation.
    #[must_use]
    pub fn spec(self) -> &'static OperationSpec {
        &OPERATIONS[self as usize]
    }

    /// Looks an operation up by its stable name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|operation| operation.spec().name == name)
    }
}

/// Field list for operations addressed by identifier only.
const ID: &[&str] = &["_id"];
/// Empty field list.
const NONE: &[&str] = &[];

/// Operation table, indexed by [`Operation`] discriminant.
pub static OPERATIONS: [OperationSpec; 26] = [
    OperationSpec {
        name: "login",
        path: "/Login",
        scope: Scope::Global,
        required: &["email", "password"],
        nullable: NONE,
        optional: NONE,
    },
    OperationSpec {
        name: "logout",
        path: "/Logout",
        scope: Scope::Global,
        required: NONE,
        nullable: NONE,
        optional: NONE,
    },
    OperationSpec {
        name: "create_space",
        path: "/CreateSpace",
        scope: Scope::Global,
        required: &["name"],
        nullable: NONE,
        optional: &["description"],
    },
    OperationSpec {
        name: "get_spaces",
        path: "/GetSpaces",
        scope: Scope::Global,
        required: NONE,
        nullable: NONE,
        optional: NONE,
    },
    OperationSpec {
        name: "get_space",
        path: "/GetSpace",
        scope: Scope::Tenant,
        required: ID,
        nullable: NONE,
        optional: NONE,
    },
    OperationSpec {
        name: "edit_space",
        path: "/EditSpace",
        scope: Scope::Tenant,
        required: ID,
        nullable: NONE,
        optional: &["name", "description"],
    },
    OperationSpec {
        name: "remove_space",
        path: "/RemoveSpace",
        scope: Scope::Tenant,
        required: ID,
        nullable: NONE,
        optional: NONE,
    },
    OperationSpec {
        name: "create_project",
        path: "/CreateProject",
        scope: Scope::Tenant,
        required: &["name"],
        nullable: NONE,
        optional: &["description", "color"],
    },
    OperationSpec {
        name: "get_project",
        path: "/GetProject",
        scope: Scope::Tenant,
        required: ID,
        nullable: NONE,
        optional: NONE,
    },
    OperationSpec {
        name: "edit_project",
        path: "/EditProject",
        scope: Scope::Tenant,
        required: ID,
        nullable: NONE,
        optional: &["name", "description", "color"],
    },
    OperationSpec {
        name: "archive_project",
        path: "/ArchiveProject",
        scope: Scope::Tenant,
        required: ID,
        nullable: NONE,
        optional: NONE,
    },
    OperationSpec {
        name: "create_board",
        path: "/CreateBoard",
        scope: Scope::Tenant,
        required: &["projectId", "name"],
        nullable: &["groups", "typesList", "customFields"],
        optional: &["description"],
    },
    OperationSpec {
        name: "get_board",
        path: "/GetBoard",
        scope: Scope::Tenant,
        required: ID,
        nullable: NONE,
        optional: NONE,
    },
    OperationSpec {
        name: "edit_board",
        path: "/EditBoard",
        scope: Scope::Tenant,
        required: ID,
        nullable: NONE,
        optional: &["name", "description"],
    },
    OperationSpec {
        name: "edit_board_group",
        path: "/EditBoardGroup",
        scope: Scope::Tenant,
        required: &["boardId", "groupId"],
        nullable: NONE,
        optional: &["name", "color", "order"],
    },
    OperationSpec {
        name: "archive_board",
        path: "/ArchiveBoard",
        scope: Scope::Tenant,
        required: ID,
        nullable: NONE,
        optional: NONE,
    },
    OperationSpec {
        name: "create_document",
        path: "/CreateDocument",
        scope: Scope::Tenant,
        required: &["containerId", "name"],
        nullable: NONE,
        optional: &["content", "parentId"],
    },
    OperationSpec {
        name: "get_document",
        path: "/GetDocument",
        scope: Scope::Tenant,
        required: ID,
        nullable: NONE,
        optional: NONE,
    },
    OperationSpec {
        name: "remove_document",
        path: "/RemoveDocument",
        scope: Scope::Tenant,
        required: ID,
        nullable: NONE,
        optional: NONE,
    },
    OperationSpec {
        name: "create_task",
        path: "/CreateTask",
        scope: Scope::Tenant,
        required: &["boardId", "name"],
        nullable: NONE,
        optional: &["groupId", "description", "assignees", "dueDate"],
    },
    OperationSpec {
        name: "get_task",
        path: "/GetTask",
        scope: Scope::Tenant,
        required: ID,
        nullable: NONE,
        optional: NONE,
    },
    OperationSpec {
        name: "edit_task",
        path: "/EditTask",
        scope: Scope::Tenant,
        required: ID,
        nullable: NONE,
        optional: &["name", "description", "assignees", "dueDate"],
    },
    OperationSpec {
        name: "remove_task",
        path: "/RemoveTask",
        scope: Scope::Tenant,
        required: ID,
        nullable: NONE,
        optional: NONE,
    },
    OperationSpec {
        name: "create_personal_access_token",
        path: "/CreatePersonalAccessToken",
        scope: Scope::Global,
        required: &["name"],
        nullable: NONE,
        optional: &["expiresAt"],
    },
    OperationSpec {
        name: "get_personal_access_token",
        path: "/GetPersonalAccessToken",
        scope: Scope::Global,
        required: ID,
        nullable: NONE,
        optional: NONE,
    },
    OperationSpec {
        name: "remove_personal_access_token",
        path: "/RemovePersonalAccessToken",
        scope: Scope::Global,
        required: ID,
        nullable: NONE,
        optional: NONE,
    },
];
