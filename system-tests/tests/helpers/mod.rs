// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for Spaceboard system-tests.
// Purpose: Provide fail-closed assertions and live context setup.
// Dependencies: system-tests, spaceboard-harness
// ============================================================================

//! ## Overview
//! Shared helpers for Spaceboard system-tests.
//! Invariants:
//! - Suites fail closed when the backend is not configured.
//! - Every resource a suite creates is owned by a harness fixture.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod checks;
