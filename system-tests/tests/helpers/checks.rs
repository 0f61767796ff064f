// system-tests/tests/helpers/checks.rs
// ============================================================================
// Module: Check Helpers
// Description: Result-returning assertions for live suites.
// Purpose: Report failures with the backend response attached.
// Dependencies: spaceboard-harness
// ============================================================================

//! Assertions that return errors instead of panicking, so fixtures created
//! earlier in a test still tear down through the normal return path.

use spaceboard_harness::ApiResponse;

/// Boxed error used by every live test.
pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Fails with `message` unless `condition` holds.
pub fn require(condition: bool, message: impl Into<String>) -> TestResult {
    if condition { Ok(()) } else { Err(message.into().into()) }
}

/// Fails unless both values are equal.
pub fn require_eq<T: PartialEq + std::fmt::Debug>(left: &T, right: &T, context: &str) -> TestResult {
    if left == right {
        Ok(())
    } else {
        Err(format!("{context}: left={left:?} right={right:?}").into())
    }
}

/// Fails unless the response carries `expected`, quoting the body.
pub fn require_status(response: &ApiResponse, expected: u16, context: &str) -> TestResult {
    response.expect_status(context, expected)?;
    Ok(())
}
