// crates/spaceboard-harness/src/fixtures/mod.rs
// ============================================================================
// Module: Resource Fixtures
// Description: RAII lifecycle guards for ephemeral backend resources.
// Purpose: Create tenant data before a test and remove it on every exit path.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Each `Temp*` type creates one backend resource on construction and tears
//! it down when dropped, including while unwinding from a panic. Children
//! hold an [`std::sync::Arc`] to their parent and declare their guard before
//! that parent, so a child is always removed before its parent is.
//!
//! ```text
//! Creating -> Ready -> TearingDown -> Removed | AlreadyGone | TeardownFailed
//!          \-> SetupFailed (no guard, nothing to tear down)
//! ```
//!
//! Teardown never panics. A resource that is already gone counts as removed;
//! any other failure is reported to the event sink and swallowed.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod guard;
mod kind;
mod resources;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use guard::Fixture;
pub use guard::ResourceGuard;
pub use guard::TeardownOutcome;
pub use kind::ResourceId;
pub use kind::ResourceKind;
pub use resources::TempAccessToken;
pub use resources::TempBoard;
pub use resources::TempDocument;
pub use resources::TempProject;
pub use resources::TempSpace;
pub use resources::TempTask;
