// system-tests/tests/suites/smoke.rs
// ============================================================================
// Module: Smoke Tests
// Description: Login and listing against a live backend.
// Purpose: Fail fast when credentials or the base URL are wrong.
// Dependencies: system-tests helpers
// ============================================================================

//! Smoke tests for Spaceboard system-tests.

use serde_json::Value;
use spaceboard_harness::Role;
use spaceboard_harness::endpoints::get_spaces_endpoint;
use spaceboard_harness::endpoints::login_endpoint;
use system_tests::live_context;

use crate::helpers::checks::TestResult;
use crate::helpers::checks::require;
use crate::helpers::checks::require_eq;
use crate::helpers::checks::require_status;

#[test]
fn owner_login_returns_token() -> TestResult {
    let ctx = live_context(&[Role::Owner])?;
    let credential = ctx
        .config()
        .credential(Role::Owner)
        .ok_or("owner credential missing")?;
    let response = ctx
        .anonymous_client()?
        .send(&login_endpoint(&credential.email, &credential.password)?)?;
    require_status(&response, 200, "login")?;
    let token = response
        .payload()
        .and_then(|payload| payload.get("token"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .or_else(|| response.set_cookie("_t"));
    require(token.is_some_and(|token| !token.is_empty()), "login returned no token")
}

#[test]
fn cached_clients_list_spaces() -> TestResult {
    let ctx = live_context(&[Role::Owner])?;
    let first = ctx.client(Role::Owner)?;
    let second = ctx.client(Role::Owner)?;
    require_eq(&ctx.tokens().len(), &1, "one cached token")?;
    for client in [&first, &second] {
        let response = client.send(&get_spaces_endpoint()?)?;
        require_status(&response, 200, "get_spaces")?;
        require(response.payload().is_some_and(Value::is_array), "spaces payload is a list")?;
    }
    Ok(())
}
