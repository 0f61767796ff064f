// system-tests/src/lib.rs
// ============================================================================
// Module: Spaceboard System Tests Library
// Description: Shared entry points for live-backend suites.
// Purpose: Build one harness context per suite from the environment.
// Dependencies: spaceboard-harness
// ============================================================================

//! ## Overview
//! Live suites in `system-tests/tests` talk to a real Spaceboard deployment.
//! They load configuration the same way every time through [`live_context`]
//! and fail closed when the backend is not configured.

// ============================================================================
// SECTION: Imports
// ============================================================================

use spaceboard_harness::HarnessContext;
use spaceboard_harness::HarnessError;
use spaceboard_harness::Role;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Loads a live context and checks every `required` role has a credential.
///
/// # Errors
///
/// Returns [`HarnessError`] when configuration is invalid or a required role
/// has no credential.
pub fn live_context(required: &[Role]) -> Result<HarnessContext, HarnessError> {
    let ctx = HarnessContext::from_env()?;
    if let Some(role) = required.iter().copied().find(|role| ctx.config().credential(*role).is_none()) {
        return Err(HarnessError::MissingCredential(role));
    }
    Ok(ctx)
}
