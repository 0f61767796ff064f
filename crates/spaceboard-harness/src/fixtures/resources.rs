// crates/spaceboard-harness/src/fixtures/resources.rs
// ============================================================================
// Module: Resource Fixtures
// Description: Concrete temporary spaces, projects, boards, documents, tasks,
//              and personal access tokens.
// Dependencies: serde_json
// ============================================================================

//! Each fixture declares its `guard` field before its parent field. Fields
//! drop in declaration order, so the child's teardown request completes
//! before the parent's reference is released.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;

use crate::client::ApiResponse;
use crate::context::HarnessContext;
use crate::endpoints::CreateAccessToken;
use crate::endpoints::CreateBoard;
use crate::endpoints::CreateDocument;
use crate::endpoints::CreateProject;
use crate::endpoints::CreateSpace;
use crate::endpoints::CreateTask;
use crate::endpoints::DescriptorError;
use crate::endpoints::create_board_endpoint;
use crate::endpoints::create_document_endpoint;
use crate::endpoints::create_personal_access_token_endpoint;
use crate::endpoints::create_project_endpoint;
use crate::endpoints::create_space_endpoint;
use crate::endpoints::create_task_endpoint;
use crate::error::HarnessError;
use crate::fixtures::guard::Fixture;
use crate::fixtures::guard::ResourceGuard;
use crate::fixtures::kind::ResourceKind;
use crate::names::unique_name;
use crate::roles::Role;
use crate::tokens::Token;

/// Returns the owning space of a tenant-scoped parent.
fn parent_space(parent: &impl Fixture) -> Result<String, HarnessError> {
    parent.space_id().map(ToString::to_string).ok_or_else(|| {
        HarnessError::Descriptor(DescriptorError::MissingSpaceId {
            operation: parent.guard().kind().create_operation().spec().name,
        })
    })
}

// ============================================================================
// SECTION: Space
// ============================================================================

/// Temporary space; removed with `remove_space`.
#[derive(Debug)]
pub struct TempSpace {
    /// Space guard.
    guard: ResourceGuard,
    /// Role the space was created as.
    role: Role,
}

impl TempSpace {
    /// Creates a uniquely named space as `role`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when login or creation fails.
    pub fn create(ctx: &HarnessContext, role: Role) -> Result<Self, HarnessError> {
        Self::create_with(
            ctx,
            role,
            &CreateSpace {
                name: unique_name("qa-space"),
                ..CreateSpace::default()
            },
        )
    }

    /// Creates a space with explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when login or creation fails.
    pub fn create_with(
        ctx: &HarnessContext,
        role: Role,
        params: &CreateSpace,
    ) -> Result<Self, HarnessError> {
        let client = ctx.client(role)?;
        let descriptor = create_space_endpoint(params)?;
        let (guard, _) = ResourceGuard::create(ResourceKind::Space, client, None, &descriptor)?;
        Ok(Self {
            guard,
            role,
        })
    }

    /// Returns the creating role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

impl Fixture for TempSpace {
    fn guard(&self) -> &ResourceGuard {
        &self.guard
    }
}

// ============================================================================
// SECTION: Project
// ============================================================================

/// Temporary project; archived with `archive_project`.
#[derive(Debug)]
pub struct TempProject {
    /// Project guard; dropped before `space`.
    guard: ResourceGuard,
    /// Owning space.
    space: Arc<TempSpace>,
}

impl TempProject {
    /// Creates a uniquely named project in `space`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when creation fails.
    pub fn create(space: &Arc<TempSpace>) -> Result<Self, HarnessError> {
        Self::create_with(
            space,
            &CreateProject {
                name: unique_name("qa-project"),
                ..CreateProject::default()
            },
        )
    }

    /// Creates a project with explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when creation fails.
    pub fn create_with(space: &Arc<TempSpace>, params: &CreateProject) -> Result<Self, HarnessError> {
        let space_id = parent_space(space.as_ref())?;
        let descriptor = create_project_endpoint(&space_id, params)?;
        let (guard, _) = ResourceGuard::create(
            ResourceKind::Project,
            space.client().clone(),
            Some(&space_id),
            &descriptor,
        )?;
        Ok(Self {
            guard,
            space: Arc::clone(space),
        })
    }

    /// Returns the owning space.
    #[must_use]
    pub fn space(&self) -> &Arc<TempSpace> {
        &self.space
    }
}

impl Fixture for TempProject {
    fn guard(&self) -> &ResourceGuard {
        &self.guard
    }
}

// ============================================================================
// SECTION: Board
// ============================================================================

/// Temporary board; archived with `archive_board`.
#[derive(Debug)]
pub struct TempBoard {
    /// Board guard; dropped before `project`.
    guard: ResourceGuard,
    /// Owning project.
    project: Arc<TempProject>,
    /// Creation payload, kept for group identifiers.
    payload: Value,
}

impl TempBoard {
    /// Creates a uniquely named board in `project` with null groups, types,
    /// and custom fields.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when creation fails.
    pub fn create(project: &Arc<TempProject>) -> Result<Self, HarnessError> {
        Self::create_with(
            project,
            &CreateBoard {
                project_id: project.id().to_string(),
                name: unique_name("qa-board"),
                ..CreateBoard::default()
            },
        )
    }

    /// Creates a board with explicit parameters.
    ///
    /// `params.project_id` is replaced by `project`'s id so the backend parent
    /// and the teardown parent are the same resource.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when creation fails.
    pub fn create_with(project: &Arc<TempProject>, params: &CreateBoard) -> Result<Self, HarnessError> {
        let space_id = parent_space(project.as_ref())?;
        let params = CreateBoard {
            project_id: project.id().to_string(),
            ..params.clone()
        };
        let descriptor = create_board_endpoint(&space_id, &params)?;
        let (guard, response) = ResourceGuard::create(
            ResourceKind::Board,
            project.client().clone(),
            Some(&space_id),
            &descriptor,
        )?;
        Ok(Self {
            guard,
            project: Arc::clone(project),
            payload: response.payload().cloned().unwrap_or(Value::Null),
        })
    }

    /// Returns the owning project.
    #[must_use]
    pub fn project(&self) -> &Arc<TempProject> {
        &self.project
    }

    /// Returns the `_id` of each group in the creation payload.
    #[must_use]
    pub fn group_ids(&self) -> Vec<&str> {
        self.payload
            .get("groups")
            .and_then(Value::as_array)
            .map(|groups| {
                groups
                    .iter()
                    .filter_map(|group| group.get("_id").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Fixture for TempBoard {
    fn guard(&self) -> &ResourceGuard {
        &self.guard
    }
}

// ============================================================================
// SECTION: Document
// ============================================================================

/// Temporary document in a project; removed with `remove_document`.
#[derive(Debug)]
pub struct TempDocument {
    /// Document guard; dropped before `project`.
    guard: ResourceGuard,
    /// Containing project.
    project: Arc<TempProject>,
}

impl TempDocument {
    /// Creates a uniquely named document in `project`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when creation fails.
    pub fn create(project: &Arc<TempProject>) -> Result<Self, HarnessError> {
        Self::create_with(
            project,
            &CreateDocument {
                container_id: project.id().to_string(),
                name: unique_name("qa-document"),
                ..CreateDocument::default()
            },
        )
    }

    /// Creates a document with explicit parameters.
    ///
    /// `params.container_id` is replaced by `project`'s id.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when creation fails.
    pub fn create_with(
        project: &Arc<TempProject>,
        params: &CreateDocument,
    ) -> Result<Self, HarnessError> {
        let space_id = parent_space(project.as_ref())?;
        let params = CreateDocument {
            container_id: project.id().to_string(),
            ..params.clone()
        };
        let descriptor = create_document_endpoint(&space_id, &params)?;
        let (guard, _) = ResourceGuard::create(
            ResourceKind::Document,
            project.client().clone(),
            Some(&space_id),
            &descriptor,
        )?;
        Ok(Self {
            guard,
            project: Arc::clone(project),
        })
    }

    /// Returns the containing project.
    #[must_use]
    pub fn project(&self) -> &Arc<TempProject> {
        &self.project
    }
}

impl Fixture for TempDocument {
    fn guard(&self) -> &ResourceGuard {
        &self.guard
    }
}

// ============================================================================
// SECTION: Task
// ============================================================================

/// Temporary task on a board; removed with `remove_task`.
#[derive(Debug)]
pub struct TempTask {
    /// Task guard; dropped before `board`.
    guard: ResourceGuard,
    /// Owning board.
    board: Arc<TempBoard>,
}

impl TempTask {
    /// Creates a uniquely named task on `board`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when creation fails.
    pub fn create(board: &Arc<TempBoard>) -> Result<Self, HarnessError> {
        Self::create_with(
            board,
            &CreateTask {
                board_id: board.id().to_string(),
                name: unique_name("qa-task"),
                ..CreateTask::default()
            },
        )
    }

    /// Creates a task with explicit parameters.
    ///
    /// `params.board_id` is replaced by `board`'s id.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when creation fails.
    pub fn create_with(board: &Arc<TempBoard>, params: &CreateTask) -> Result<Self, HarnessError> {
        let space_id = parent_space(board.as_ref())?;
        let params = CreateTask {
            board_id: board.id().to_string(),
            ..params.clone()
        };
        let descriptor = create_task_endpoint(&space_id, &params)?;
        let (guard, _) = ResourceGuard::create(
            ResourceKind::Task,
            board.client().clone(),
            Some(&space_id),
            &descriptor,
        )?;
        Ok(Self {
            guard,
            board: Arc::clone(board),
        })
    }

    /// Returns the owning board.
    #[must_use]
    pub fn board(&self) -> &Arc<TempBoard> {
        &self.board
    }
}

impl Fixture for TempTask {
    fn guard(&self) -> &ResourceGuard {
        &self.guard
    }
}

// ============================================================================
// SECTION: Personal Access Token
// ============================================================================

/// Temporary personal access token; removed with
/// `remove_personal_access_token`.
#[derive(Debug)]
pub struct TempAccessToken {
    /// Token guard.
    guard: ResourceGuard,
    /// Secret returned at creation, when the backend discloses it.
    secret: Option<Token>,
}

impl TempAccessToken {
    /// Creates a uniquely named token for `role`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when login or creation fails.
    pub fn create(ctx: &HarnessContext, role: Role) -> Result<Self, HarnessError> {
        Self::create_with(
            ctx,
            role,
            &CreateAccessToken {
                name: unique_name("qa-token"),
                ..CreateAccessToken::default()
            },
        )
    }

    /// Creates a token with explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when login or creation fails.
    pub fn create_with(
        ctx: &HarnessContext,
        role: Role,
        params: &CreateAccessToken,
    ) -> Result<Self, HarnessError> {
        let client = ctx.client(role)?;
        let descriptor = create_personal_access_token_endpoint(params)?;
        let (guard, response) =
            ResourceGuard::create(ResourceKind::PersonalAccessToken, client, None, &descriptor)?;
        let secret = secret_from(&response);
        Ok(Self {
            guard,
            secret,
        })
    }

    /// Returns the token secret, when the backend returned one.
    #[must_use]
    pub const fn secret(&self) -> Option<&Token> {
        self.secret.as_ref()
    }
}

/// Reads `payload.token` from a creation response.
fn secret_from(response: &ApiResponse) -> Option<Token> {
    response
        .payload()
        .and_then(|payload| payload.get("token"))
        .and_then(Value::as_str)
        .and_then(Token::new)
}

impl Fixture for TempAccessToken {
    fn guard(&self) -> &ResourceGuard {
        &self.guard
    }
}
