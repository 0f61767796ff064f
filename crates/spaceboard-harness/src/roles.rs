// crates/spaceboard-harness/src/roles.rs
// ============================================================================
// Module: Roles and Access Matrix
// Description: Actor roles and per-role expected-status matrices.
// Purpose: Drive one operation as every role and compare observed statuses.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Roles are the fixed actors of the suite. An [`AccessMatrix`] pairs each
//! role with the status the backend should return for one operation, runs
//! the operation with a client authenticated as that role, and reports every
//! mismatch at once instead of stopping at the first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::client::ApiResponse;
use crate::client::SessionClient;
use crate::context::HarnessContext;
use crate::error::HarnessError;

// ============================================================================
// SECTION: Roles
// ============================================================================

/// Named actor with a fixed credential and permission level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Space owner.
    Owner,
    /// Space manager.
    Manager,
    /// Regular space member.
    Member,
    /// Read-mostly guest.
    Guest,
    /// User belonging to a different tenant.
    Foreign,
}

impl Role {
    /// Every role, in permission order.
    pub const ALL: [Self; 5] = [Self::Owner, Self::Manager, Self::Member, Self::Guest, Self::Foreign];

    /// Returns the stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Manager => "manager",
            Self::Member => "member",
            Self::Guest => "guest",
            Self::Foreign => "foreign",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown role: {trimmed}"))
    }
}

// ============================================================================
// SECTION: Access Matrix
// ============================================================================

/// Expected status for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessCase {
    /// Role the request is issued as.
    pub role: Role,
    /// Status the backend should return.
    pub expected_status: u16,
}

/// Observed result for one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessOutcome {
    /// Role the request was issued as.
    pub role: Role,
    /// Status the backend should have returned.
    pub expected_status: u16,
    /// Status the backend did return.
    pub actual_status: u16,
    /// Raw response body.
    pub body: String,
}

impl AccessOutcome {
    /// Returns true when the observed status matched.
    #[must_use]
    pub const fn matched(&self) -> bool {
        self.expected_status == self.actual_status
    }
}

/// Role → expected-status table for a single operation.
#[derive(Debug, Clone, Default)]
pub struct AccessMatrix {
    /// Cases in insertion order.
    cases: Vec<AccessCase>,
}

impl AccessMatrix {
    /// Creates an empty matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the expectation for `role`.
    #[must_use]
    pub fn expect(mut self, role: Role, expected_status: u16) -> Self {
        if let Some(case) = self.cases.iter_mut().find(|case| case.role == role) {
            case.expected_status = expected_status;
        } else {
            self.cases.push(AccessCase {
                role,
                expected_status,
            });
        }
        self
    }

    /// Sets the same expectation for every role not yet listed.
    #[must_use]
    pub fn otherwise(mut self, expected_status: u16) -> Self {
        for role in Role::ALL {
            if !self.cases.iter().any(|case| case.role == role) {
                self.cases.push(AccessCase {
                    role,
                    expected_status,
                });
            }
        }
        self
    }

    /// Returns the configured cases.
    #[must_use]
    pub fn cases(&self) -> &[AccessCase] {
        &self.cases
    }

    /// Runs `operation` once per case with a client authenticated as the role.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when a role cannot be authenticated or the
    /// operation fails at the transport level. Status mismatches are not
    /// errors here; inspect the returned [`AccessReport`].
    pub fn run<F>(&self, ctx: &HarnessContext, mut operation: F) -> Result<AccessReport, HarnessError>
    where
        F: FnMut(&SessionClient) -> Result<ApiResponse, HarnessError>,
    {
        let mut outcomes = Vec::with_capacity(self.cases.len());
        for case in &self.cases {
            let client = ctx.client(case.role)?;
            let response = operation(&client)?;
            outcomes.push(AccessOutcome {
                role: case.role,
                expected_status: case.expected_status,
                actual_status: response.status(),
                body: response.text().to_string(),
            });
        }
        Ok(AccessReport {
            outcomes,
        })
    }
}

/// Per-role results of an [`AccessMatrix`] run.
#[derive(Debug, Clone)]
pub struct AccessReport {
    /// Outcomes in case order.
    outcomes: Vec<AccessOutcome>,
}

impl AccessReport {
    /// Returns every outcome.
    #[must_use]
    pub fn outcomes(&self) -> &[AccessOutcome] {
        &self.outcomes
    }

    /// Returns outcomes whose status differed from the expectation.
    pub fn mismatches(&self) -> impl Iterator<Item = &AccessOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.matched())
    }

    /// Fails with a combined message listing every mismatching role.
    ///
    /// # Errors
    ///
    /// Returns a message naming each role, its expected and actual status,
    /// and the response body.
    pub fn into_result(self) -> Result<(), String> {
        let lines: Vec<String> = self
            .mismatches()
            .map(|outcome| {
                format!(
                    "{}: expected {}, got {} ({})",
                    outcome.role, outcome.expected_status, outcome.actual_status, outcome.body
                )
            })
            .collect();
        if lines.is_empty() { Ok(()) } else { Err(lines.join("\n")) }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
