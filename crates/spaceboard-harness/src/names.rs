// crates/spaceboard-harness/src/names.rs
// ============================================================================
// Module: Resource Names
// Description: Unique names for ephemeral backend resources.
// Dependencies: rand
// ============================================================================

//! Fixture-created resources get a recognizable prefix plus a random suffix
//! so leftovers from an interrupted run are easy to spot and never collide.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of the random suffix.
const SUFFIX_LEN: usize = 10;

/// Returns `"{prefix}-{suffix}"` with a random lowercase alphanumeric suffix.
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|byte| char::from(byte).to_ascii_lowercase())
        .collect();
    format!("{prefix}-{suffix}")
}
