// system-tests/tests/suites/spaces.rs
// ============================================================================
// Module: Space Lifecycle Tests
// Description: Space, project, document, and task round trips.
// Purpose: Verify fixtures create, read back, and remove tenant data.
// Dependencies: system-tests helpers
// ============================================================================

//! Space lifecycle tests for Spaceboard system-tests.

use std::error::Error;

use serde_json::Value;
use spaceboard_harness::Fixture;
use spaceboard_harness::Patch;
use spaceboard_harness::Role;
use spaceboard_harness::SessionClient;
use spaceboard_harness::TempDocument;
use spaceboard_harness::TempTask;
use spaceboard_harness::endpoints::EditSpace;
use spaceboard_harness::endpoints::EditTask;
use spaceboard_harness::endpoints::edit_space_endpoint;
use spaceboard_harness::endpoints::edit_task_endpoint;
use spaceboard_harness::endpoints::get_spaces_endpoint;
use system_tests::live_context;

use crate::helpers::checks::TestResult;
use crate::helpers::checks::require;
use crate::helpers::checks::require_eq;
use crate::helpers::checks::require_status;

/// Returns true when `GetSpaces` lists `space_id`.
fn listed(client: &SessionClient, space_id: &str) -> Result<bool, Box<dyn Error>> {
    let response = client.send(&get_spaces_endpoint()?)?;
    require_status(&response, 200, "get_spaces")?;
    Ok(response.payload().and_then(Value::as_array).is_some_and(|spaces| {
        spaces.iter().any(|space| space.get("_id").and_then(Value::as_str) == Some(space_id))
    }))
}

#[test]
fn space_round_trip_then_gone_after_teardown() -> TestResult {
    let ctx = live_context(&[Role::Owner])?;
    let space = ctx.temp_space(Role::Owner)?;
    let space_id = space.id().to_string();
    let client = space.client().clone();

    let fetched = space.fetch()?;
    require_status(&fetched, 200, "get_space")?;
    require_eq(&fetched.id(), &Some(space_id.as_str()), "fetched id")?;
    require(listed(&client, &space_id)?, "new space is listed")?;

    drop(space);
    require(!listed(&client, &space_id)?, "removed space is no longer listed")
}

#[test]
fn edit_space_leaves_omitted_fields_untouched() -> TestResult {
    let ctx = live_context(&[Role::Owner])?;
    let space = ctx.temp_space(Role::Owner)?;
    let before = space.fetch()?;
    let name = before
        .payload()
        .and_then(|payload| payload.get("name"))
        .cloned()
        .ok_or("space has no name")?;

    let descriptor = edit_space_endpoint(
        space.id(),
        &EditSpace {
            description: Patch::Set("edited by system tests".to_string()),
            ..EditSpace::default()
        },
    )?;
    require_status(&space.client().send(&descriptor)?, 200, "edit_space")?;

    let after = space.fetch()?;
    require_eq(&after.payload().and_then(|payload| payload.get("name")), &Some(&name), "name kept")
}

#[test]
fn document_and_task_live_under_their_parents() -> TestResult {
    let ctx = live_context(&[Role::Owner])?;
    let board = ctx.temp_board(Role::Owner)?;
    let document = TempDocument::create(board.project())?;
    let task = TempTask::create(&board)?;

    require_status(&document.fetch()?, 200, "get_document")?;
    require_status(&task.fetch()?, 200, "get_task")?;

    let descriptor = edit_task_endpoint(
        task.space_id().ok_or("task has no space")?,
        task.id(),
        &EditTask {
            assignees: Patch::Set(Vec::new()),
            due_date: Patch::Null,
            ..EditTask::default()
        },
    )?;
    require_status(&task.client().send(&descriptor)?, 200, "edit_task")
}
