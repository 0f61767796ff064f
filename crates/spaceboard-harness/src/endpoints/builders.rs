// crates/spaceboard-harness/src/endpoints/builders.rs
// ============================================================================
// Module: Typed Endpoint Builders
// Description: Domain-level builder functions over the operation table.
// Purpose: Let tests build request descriptors with typed parameters.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! One function per operation. Required parameters are plain arguments,
//! required-but-nullable parameters are [`Option`] (always sent, `None` as
//! `null`), and optional parameters are [`Patch`] (left out unless supplied).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use super::descriptor::DescriptorError;
use super::descriptor::EndpointDescriptor;
use super::descriptor::FieldSet;
use super::descriptor::Patch;
use super::descriptor::build_descriptor;
use super::table::Operation;

// ============================================================================
// SECTION: Parameter Types
// ============================================================================

/// Parameters for `create_space`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSpace {
    /// Space name.
    pub name: String,
    /// Optional description.
    pub description: Patch<String>,
}

/// Parameters for `edit_space`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSpace {
    /// New name.
    pub name: Patch<String>,
    /// New description.
    pub description: Patch<String>,
}

/// Parameters for `create_project`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateProject {
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Patch<String>,
    /// Optional color.
    pub color: Patch<String>,
}

/// Parameters for `edit_project`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditProject {
    /// New name.
    pub name: Patch<String>,
    /// New description.
    pub description: Patch<String>,
    /// New color.
    pub color: Patch<String>,
}

/// Parameters for `create_board`.
///
/// `groups`, `types_list`, and `custom_fields` are always sent; `None`
/// becomes an explicit `null` and an empty vector stays `[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateBoard {
    /// Owning project identifier.
    pub project_id: String,
    /// Board name.
    pub name: String,
    /// Board groups.
    pub groups: Option<Vec<Value>>,
    /// Task types.
    pub types_list: Option<Vec<Value>>,
    /// Custom field definitions.
    pub custom_fields: Option<Vec<Value>>,
    /// Optional description.
    pub description: Patch<String>,
}

/// Parameters for `edit_board`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBoard {
    /// New name.
    pub name: Patch<String>,
    /// New description.
    pub description: Patch<String>,
}

/// Parameters for `edit_board_group`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBoardGroup {
    /// Board identifier.
    pub board_id: String,
    /// Group identifier.
    pub group_id: String,
    /// New name.
    pub name: Patch<String>,
    /// New color.
    pub color: Patch<String>,
    /// New position.
    pub order: Patch<i64>,
}

/// Parameters for `create_document`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDocument {
    /// Container (project) identifier.
    pub container_id: String,
    /// Document name.
    pub name: String,
    /// Optional initial content.
    pub content: Patch<String>,
    /// Optional parent document.
    pub parent_id: Patch<String>,
}

/// Parameters for `create_task`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTask {
    /// Owning board identifier.
    pub board_id: String,
    /// Task name.
    pub name: String,
    /// Optional board group.
    pub group_id: Patch<String>,
    /// Optional description.
    pub description: Patch<String>,
    /// Optional assignee identifiers.
    pub assignees: Patch<Vec<String>>,
    /// Optional due date (ISO-8601).
    pub due_date: Patch<String>,
}

/// Parameters for `edit_task`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditTask {
    /// New name.
    pub name: Patch<String>,
    /// New description.
    pub description: Patch<String>,
    /// New assignee identifiers.
    pub assignees: Patch<Vec<String>>,
    /// New due date (ISO-8601).
    pub due_date: Patch<String>,
}

/// Parameters for `create_personal_access_token`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateAccessToken {
    /// Token label.
    pub name: String,
    /// Optional expiry (ISO-8601).
    pub expires_at: Patch<String>,
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a descriptor addressed only by `_id`.
fn by_id(
    operation: Operation,
    space_id: Option<&str>,
    id: &str,
) -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(operation, space_id, FieldSet::new().set("_id", id))
}

// ============================================================================
// SECTION: Auth
// ============================================================================

/// `/Login` with email and password.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn login_endpoint(email: &str, password: &str) -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(
        Operation::Login,
        None,
        FieldSet::new().set("email", email).set("password", password),
    )
}

/// `/Logout`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn logout_endpoint() -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(Operation::Logout, None, FieldSet::new())
}

// ============================================================================
// SECTION: Spaces
// ============================================================================

/// `/CreateSpace`; runs before space selection so carries no space header.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn create_space_endpoint(params: &CreateSpace) -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(
        Operation::CreateSpace,
        None,
        FieldSet::new()
            .set("name", params.name.as_str())
            .patch("description", params.description.clone()),
    )
}

/// `/GetSpaces`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn get_spaces_endpoint() -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(Operation::GetSpaces, None, FieldSet::new())
}

/// `/GetSpace`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn get_space_endpoint(space_id: &str) -> Result<EndpointDescriptor, DescriptorError> {
    by_id(Operation::GetSpace, Some(space_id), space_id)
}

/// `/EditSpace`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn edit_space_endpoint(
    space_id: &str,
    params: &EditSpace,
) -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(
        Operation::EditSpace,
        Some(space_id),
        FieldSet::new()
            .set("_id", space_id)
            .patch("name", params.name.clone())
            .patch("description", params.description.clone()),
    )
}

/// `/RemoveSpace`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn remove_space_endpoint(space_id: &str) -> Result<EndpointDescriptor, DescriptorError> {
    by_id(Operation::RemoveSpace, Some(space_id), space_id)
}

// ============================================================================
// SECTION: Projects
// ============================================================================

/// `/CreateProject`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn create_project_endpoint(
    space_id: &str,
    params: &CreateProject,
) -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(
        Operation::CreateProject,
        Some(space_id),
        FieldSet::new()
            .set("name", params.name.as_str())
            .patch("description", params.description.clone())
            .patch("color", params.color.clone()),
    )
}

/// `/GetProject`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn get_project_endpoint(
    space_id: &str,
    project_id: &str,
) -> Result<EndpointDescriptor, DescriptorError> {
    by_id(Operation::GetProject, Some(space_id), project_id)
}

/// `/EditProject`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn edit_project_endpoint(
    space_id: &str,
    project_id: &str,
    params: &EditProject,
) -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(
        Operation::EditProject,
        Some(space_id),
        FieldSet::new()
            .set("_id", project_id)
            .patch("name", params.name.clone())
            .patch("description", params.description.clone())
            .patch("color", params.color.clone()),
    )
}

/// `/ArchiveProject`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn archive_project_endpoint(
    space_id: &str,
    project_id: &str,
) -> Result<EndpointDescriptor, DescriptorError> {
    by_id(Operation::ArchiveProject, Some(space_id), project_id)
}

// ============================================================================
// SECTION: Boards
// ============================================================================

/// `/CreateBoard`; `groups`, `typesList`, and `customFields` are always present.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn create_board_endpoint(
    space_id: &str,
    params: &CreateBoard,
) -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(
        Operation::CreateBoard,
        Some(space_id),
        FieldSet::new()
            .set("projectId", params.project_id.as_str())
            .set("name", params.name.as_str())
            .nullable("groups", params.groups.clone())
            .nullable("typesList", params.types_list.clone())
            .nullable("customFields", params.custom_fields.clone())
            .patch("description", params.description.clone()),
    )
}

/// `/GetBoard`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn get_board_endpoint(
    space_id: &str,
    board_id: &str,
) -> Result<EndpointDescriptor, DescriptorError> {
    by_id(Operation::GetBoard, Some(space_id), board_id)
}

/// `/EditBoard`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn edit_board_endpoint(
    space_id: &str,
    board_id: &str,
    params: &EditBoard,
) -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(
        Operation::EditBoard,
        Some(space_id),
        FieldSet::new()
            .set("_id", board_id)
            .patch("name", params.name.clone())
            .patch("description", params.description.clone()),
    )
}

/// `/EditBoardGroup`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn edit_board_group_endpoint(
    space_id: &str,
    params: &EditBoardGroup,
) -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(
        Operation::EditBoardGroup,
        Some(space_id),
        FieldSet::new()
            .set("boardId", params.board_id.as_str())
            .set("groupId", params.group_id.as_str())
            .patch("name", params.name.clone())
            .patch("color", params.color.clone())
            .patch("order", params.order.clone()),
    )
}

/// `/ArchiveBoard`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn archive_board_endpoint(
    space_id: &str,
    board_id: &str,
) -> Result<EndpointDescriptor, DescriptorError> {
    by_id(Operation::ArchiveBoard, Some(space_id), board_id)
}

// ============================================================================
// SECTION: Documents
// ============================================================================

/// `/CreateDocument`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn create_document_endpoint(
    space_id: &str,
    params: &CreateDocument,
) -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(
        Operation::CreateDocument,
        Some(space_id),
        FieldSet::new()
            .set("containerId", params.container_id.as_str())
            .set("name", params.name.as_str())
            .patch("content", params.content.clone())
            .patch("parentId", params.parent_id.clone()),
    )
}

/// `/GetDocument`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn get_document_endpoint(
    space_id: &str,
    document_id: &str,
) -> Result<EndpointDescriptor, DescriptorError> {
    by_id(Operation::GetDocument, Some(space_id), document_id)
}

/// `/RemoveDocument`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn remove_document_endpoint(
    space_id: &str,
    document_id: &str,
) -> Result<EndpointDescriptor, DescriptorError> {
    by_id(Operation::RemoveDocument, Some(space_id), document_id)
}

// ============================================================================
// SECTION: Tasks
// ============================================================================

/// `/CreateTask`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn create_task_endpoint(
    space_id: &str,
    params: &CreateTask,
) -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(
        Operation::CreateTask,
        Some(space_id),
        FieldSet::new()
            .set("boardId", params.board_id.as_str())
            .set("name", params.name.as_str())
            .patch("groupId", params.group_id.clone())
            .patch("description", params.description.clone())
            .patch("assignees", params.assignees.clone())
            .patch("dueDate", params.due_date.clone()),
    )
}

/// `/GetTask`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn get_task_endpoint(space_id: &str, task_id: &str) -> Result<EndpointDescriptor, DescriptorError> {
    by_id(Operation::GetTask, Some(space_id), task_id)
}

/// `/EditTask`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn edit_task_endpoint(
    space_id: &str,
    task_id: &str,
    params: &EditTask,
) -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(
        Operation::EditTask,
        Some(space_id),
        FieldSet::new()
            .set("_id", task_id)
            .patch("name", params.name.clone())
            .patch("description", params.description.clone())
            .patch("assignees", params.assignees.clone())
            .patch("dueDate", params.due_date.clone()),
    )
}

/// `/RemoveTask`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn remove_task_endpoint(
    space_id: &str,
    task_id: &str,
) -> Result<EndpointDescriptor, DescriptorError> {
    by_id(Operation::RemoveTask, Some(space_id), task_id)
}

// ============================================================================
// SECTION: Personal Access Tokens
// ============================================================================

/// `/CreatePersonalAccessToken`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn create_personal_access_token_endpoint(
    params: &CreateAccessToken,
) -> Result<EndpointDescriptor, DescriptorError> {
    build_descriptor(
        Operation::CreatePersonalAccessToken,
        None,
        FieldSet::new()
            .set("name", params.name.as_str())
            .patch("expiresAt", params.expires_at.clone()),
    )
}

/// `/GetPersonalAccessToken`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn get_personal_access_token_endpoint(
    token_id: &str,
) -> Result<EndpointDescriptor, DescriptorError> {
    by_id(Operation::GetPersonalAccessToken, None, token_id)
}

/// `/RemovePersonalAccessToken`.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the operation table rejects the fields.
pub fn remove_personal_access_token_endpoint(
    token_id: &str,
) -> Result<EndpointDescriptor, DescriptorError> {
    by_id(Operation::RemovePersonalAccessToken, None, token_id)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions.")]

    use serde_json::json;

    use super::CreateBoard;
    use super::CreateTask;
    use super::EditBoard;
    use super::EditBoardGroup;
    use super::EditSpace;
    use super::archive_board_endpoint;
    use super::archive_project_endpoint;
    use super::create_board_endpoint;
    use super::create_task_endpoint;
    use super::edit_board_endpoint;
    use super::edit_board_group_endpoint;
    use super::edit_space_endpoint;
    use super::get_board_endpoint;
    use super::get_document_endpoint;
    use super::get_personal_access_token_endpoint;
    use super::get_project_endpoint;
    use super::get_space_endpoint;
    use super::get_task_endpoint;
    use super::logout_endpoint;
    use super::remove_document_endpoint;
    use super::remove_personal_access_token_endpoint;
    use super::remove_space_endpoint;
    use super::remove_task_endpoint;
    use crate::endpoints::Patch;
    use crate::endpoints::SPACE_HEADER;

    #[test]
    fn create_board_sends_explicit_nulls() {
        let descriptor = create_board_endpoint(
            "space-1",
            &CreateBoard {
                project_id: "p-1".to_string(),
                name: "X".to_string(),
                ..CreateBoard::default()
            },
        )
        .unwrap();
        assert_eq!(
            descriptor.json(),
            Some(&json!({
                "projectId": "p-1",
                "name": "X",
                "groups": null,
                "typesList": null,
                "customFields": null,
            }))
        );
        assert_eq!(descriptor.headers().get(SPACE_HEADER).map(String::as_str), Some("space-1"));
    }

    #[test]
    fn create_board_keeps_empty_groups_distinct_from_null() {
        let base = CreateBoard {
            project_id: "p-1".to_string(),
            name: "X".to_string(),
            ..CreateBoard::default()
        };
        let empty = CreateBoard {
            groups: Some(Vec::new()),
            ..base.clone()
        };
        let null = create_board_endpoint("s", &base).unwrap();
        let empty = create_board_endpoint("s", &empty).unwrap();
        assert_eq!(empty.json().unwrap()["groups"], json!([]));
        assert_ne!(null, empty);
    }

    #[test]
    fn edit_board_group_only_sends_supplied_fields() {
        let descriptor = edit_board_group_endpoint(
            "s",
            &EditBoardGroup {
                board_id: "b".to_string(),
                group_id: "g".to_string(),
                color: Patch::Null,
                order: Patch::Set(2),
                ..EditBoardGroup::default()
            },
        )
        .unwrap();
        assert_eq!(
            descriptor.json(),
            Some(&json!({"boardId": "b", "groupId": "g", "color": null, "order": 2}))
        );
    }

    #[test]
    fn create_task_assignees_empty_list_is_sent() {
        let descriptor = create_task_endpoint(
            "s",
            &CreateTask {
                board_id: "b".to_string(),
                name: "t".to_string(),
                assignees: Patch::Set(Vec::new()),
                ..CreateTask::default()
            },
        )
        .unwrap();
        let body = descriptor.json().unwrap();
        assert_eq!(body["assignees"], json!([]));
        assert!(body.get("dueDate").is_none());
    }

    #[test]
    fn logout_has_no_body_or_space() {
        let descriptor = logout_endpoint().unwrap();
        assert_eq!(descriptor.path(), "/Logout");
        assert!(descriptor.json().is_none());
        assert!(descriptor.space_id().is_none());
    }

    #[test]
    fn edit_space_scopes_to_the_edited_space() {
        let descriptor = edit_space_endpoint(
            "s-9",
            &EditSpace {
                name: Patch::Set("renamed".to_string()),
                ..EditSpace::default()
            },
        )
        .unwrap();
        assert_eq!(descriptor.space_id(), Some("s-9"));
        assert_eq!(descriptor.json(), Some(&json!({"_id": "s-9", "name": "renamed"})));
    }

    #[test]
    fn edit_board_can_clear_description() {
        let descriptor = edit_board_endpoint(
            "s",
            "b-1",
            &EditBoard {
                description: Patch::Null,
                ..EditBoard::default()
            },
        )
        .unwrap();
        assert_eq!(descriptor.json(), Some(&json!({"_id": "b-1", "description": null})));
    }

    #[test]
    fn id_addressed_builders_send_only_the_id() {
        let tenant = [
            (get_space_endpoint("s").unwrap(), "/GetSpace", "s"),
            (remove_space_endpoint("s").unwrap(), "/RemoveSpace", "s"),
            (get_project_endpoint("s", "x").unwrap(), "/GetProject", "x"),
            (archive_project_endpoint("s", "x").unwrap(), "/ArchiveProject", "x"),
            (get_board_endpoint("s", "x").unwrap(), "/GetBoard", "x"),
            (archive_board_endpoint("s", "x").unwrap(), "/ArchiveBoard", "x"),
            (get_document_endpoint("s", "x").unwrap(), "/GetDocument", "x"),
            (remove_document_endpoint("s", "x").unwrap(), "/RemoveDocument", "x"),
            (get_task_endpoint("s", "x").unwrap(), "/GetTask", "x"),
            (remove_task_endpoint("s", "x").unwrap(), "/RemoveTask", "x"),
        ];
        for (descriptor, path, id) in &tenant {
            assert_eq!(descriptor.path(), *path);
            assert_eq!(descriptor.json(), Some(&json!({"_id": id})));
            assert_eq!(descriptor.space_id(), Some("s"));
        }

        for descriptor in [
            get_personal_access_token_endpoint("t").unwrap(),
            remove_personal_access_token_endpoint("t").unwrap(),
        ] {
            assert_eq!(descriptor.json(), Some(&json!({"_id": "t"})));
            assert!(descriptor.space_id().is_none());
        }
    }
}
