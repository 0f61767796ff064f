// system-tests/tests/suites/boards.rs
// ============================================================================
// Module: Board Tests
// Description: Board creation with nullable fields and group edits.
// Purpose: Verify explicit nulls and partial group updates are accepted.
// Dependencies: system-tests helpers
// ============================================================================

//! Board tests for Spaceboard system-tests.

use spaceboard_harness::Fixture;
use spaceboard_harness::Patch;
use spaceboard_harness::Role;
use spaceboard_harness::TempBoard;
use spaceboard_harness::endpoints::CreateBoard;
use spaceboard_harness::endpoints::EditBoardGroup;
use spaceboard_harness::endpoints::edit_board_group_endpoint;
use spaceboard_harness::names::unique_name;
use system_tests::live_context;

use crate::helpers::checks::TestResult;
use crate::helpers::checks::require;
use crate::helpers::checks::require_status;

#[test]
fn board_with_null_collections_is_created() -> TestResult {
    let ctx = live_context(&[Role::Owner])?;
    let project = ctx.temp_project(Role::Owner)?;
    let board = TempBoard::create_with(
        &project,
        &CreateBoard {
            project_id: project.id().to_string(),
            name: unique_name("qa-board"),
            ..CreateBoard::default()
        },
    )?;
    require_status(&board.fetch()?, 200, "get_board")
}

#[test]
fn board_with_empty_collections_is_created() -> TestResult {
    let ctx = live_context(&[Role::Owner])?;
    let project = ctx.temp_project(Role::Owner)?;
    let board = TempBoard::create_with(
        &project,
        &CreateBoard {
            project_id: project.id().to_string(),
            name: unique_name("qa-board"),
            groups: Some(Vec::new()),
            types_list: Some(Vec::new()),
            custom_fields: Some(Vec::new()),
            ..CreateBoard::default()
        },
    )?;
    require_status(&board.fetch()?, 200, "get_board")
}

#[test]
fn group_rename_only_sends_name() -> TestResult {
    let ctx = live_context(&[Role::Owner])?;
    let board = ctx.temp_board(Role::Owner)?;
    let group_id = board
        .group_ids()
        .first()
        .map(ToString::to_string)
        .ok_or("board has no default group")?;

    let descriptor = edit_board_group_endpoint(
        board.space_id().ok_or("board has no space")?,
        &EditBoardGroup {
            board_id: board.id().to_string(),
            group_id,
            name: Patch::Set("Renamed".to_string()),
            ..EditBoardGroup::default()
        },
    )?;
    let body = descriptor.json().ok_or("edit_board_group has a body")?;
    require(body.get("color").is_none() && body.get("order").is_none(), "omitted fields absent")?;
    require_status(&board.client().send(&descriptor)?, 200, "edit_board_group")
}
