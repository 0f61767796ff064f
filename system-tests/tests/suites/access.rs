// system-tests/tests/suites/access.rs
// ============================================================================
// Module: Access Control Tests
// Description: Per-role status matrices over tenant resources.
// Purpose: Verify role boundaries, reporting every mismatching role at once.
// Dependencies: system-tests helpers
// ============================================================================

//! Access control tests for Spaceboard system-tests.

use spaceboard_harness::AccessMatrix;
use spaceboard_harness::Fixture;
use spaceboard_harness::Role;
use spaceboard_harness::TempAccessToken;
use spaceboard_harness::endpoints::archive_project_endpoint;
use spaceboard_harness::endpoints::get_personal_access_token_endpoint;
use spaceboard_harness::endpoints::get_project_endpoint;
use system_tests::live_context;

use crate::helpers::checks::TestResult;
use crate::helpers::checks::require_status;

#[test]
fn foreign_tenant_cannot_read_project() -> TestResult {
    let ctx = live_context(&Role::ALL)?;
    let project = ctx.temp_project(Role::Owner)?;
    let descriptor =
        get_project_endpoint(project.space_id().ok_or("project has no space")?, project.id())?;

    AccessMatrix::new()
        .expect(Role::Owner, 200)
        .expect(Role::Foreign, 403)
        .run(&ctx, |client| client.send(&descriptor))?
        .into_result()?;
    Ok(())
}

#[test]
fn only_privileged_roles_archive_projects() -> TestResult {
    let ctx = live_context(&Role::ALL)?;
    let project = ctx.temp_project(Role::Owner)?;
    let descriptor =
        archive_project_endpoint(project.space_id().ok_or("project has no space")?, project.id())?;

    AccessMatrix::new()
        .expect(Role::Guest, 403)
        .expect(Role::Foreign, 403)
        .run(&ctx, |client| client.send(&descriptor))?
        .into_result()?;
    Ok(())
}

#[test]
fn access_tokens_are_private_to_their_owner() -> TestResult {
    let ctx = live_context(&[Role::Member, Role::Guest])?;
    let token = TempAccessToken::create(&ctx, Role::Member)?;
    require_status(&token.fetch()?, 200, "get_personal_access_token")?;

    let descriptor = get_personal_access_token_endpoint(token.id())?;
    let response = ctx.client(Role::Guest)?.send(&descriptor)?;
    require_status(&response, 404, "get_personal_access_token as guest")
}
