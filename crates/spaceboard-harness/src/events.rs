// crates/spaceboard-harness/src/events.rs
// ============================================================================
// Module: Harness Events
// Description: Structured events for requests, logins, and fixture lifecycles.
// Purpose: Emit JSON-line logs without a global logger.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every request, login, and fixture transition is reported to an
//! [`EventSink`]. Sinks serialize events as JSON lines so a failed run can be
//! reconstructed from the log. Events carry roles, paths, statuses, and
//! resource identifiers only; credentials and tokens never appear.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use serde_json::Value;

use crate::config::EventLogTarget;
use crate::roles::Role;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Milliseconds since the Unix epoch.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// One HTTP exchange issued by a session client.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// HTTP method.
    pub method: &'static str,
    /// Request path relative to the base URL.
    pub path: String,
    /// Tenant scope header, when present.
    pub space_id: Option<String>,
    /// Response status, or `None` on transport failure.
    pub status: Option<u16>,
    /// Transport error message, when the request failed.
    pub error: Option<String>,
    /// Wall-clock duration of the exchange.
    pub duration_ms: u128,
}

impl RequestEvent {
    /// Creates a request event stamped with the current time.
    #[must_use]
    pub fn new(method: &'static str, path: &str, space_id: Option<String>) -> Self {
        Self {
            event: "http_request",
            timestamp_ms: now_millis(),
            method,
            path: path.to_string(),
            space_id,
            status: None,
            error: None,
            duration_ms: 0,
        }
    }
}

/// Token cache activity.
#[derive(Debug, Clone, Serialize)]
pub struct AuthEvent {
    /// Event identifier (`token_cache_hit`, `login`, `login_failed`, `token_reset`).
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Role concerned, or `None` for a full cache reset.
    pub role: Option<Role>,
    /// Login status when a login was attempted.
    pub status: Option<u16>,
}

impl AuthEvent {
    /// Creates an auth event stamped with the current time.
    #[must_use]
    pub fn new(event: &'static str, role: Option<Role>, status: Option<u16>) -> Self {
        Self {
            event,
            timestamp_ms: now_millis(),
            role,
            status,
        }
    }
}

/// Fixture lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixturePhase {
    /// Creation request is in flight.
    Creating,
    /// Creation succeeded; the handle belongs to the test.
    Ready,
    /// Creation failed; nothing to tear down.
    SetupFailed,
    /// Teardown request is in flight.
    TearingDown,
    /// Resource removed or archived.
    Removed,
    /// Resource was already gone when teardown ran.
    AlreadyGone,
    /// Teardown failed; the failure was swallowed.
    TeardownFailed,
}

/// Fixture lifecycle transition.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Resource kind label.
    pub kind: &'static str,
    /// New phase.
    pub phase: FixturePhase,
    /// Resource identifier once known.
    pub resource_id: Option<String>,
    /// Owning space identifier, when tenant-scoped.
    pub space_id: Option<String>,
    /// Failure detail, when any.
    pub detail: Option<String>,
}

impl FixtureEvent {
    /// Creates a fixture event stamped with the current time.
    #[must_use]
    pub fn new(kind: &'static str, phase: FixturePhase) -> Self {
        Self {
            event: "fixture",
            timestamp_ms: now_millis(),
            kind,
            phase,
            resource_id: None,
            space_id: None,
            detail: None,
        }
    }

    /// Attaches the resource and space identifiers.
    #[must_use]
    pub fn with_ids(mut self, resource_id: Option<&str>, space_id: Option<&str>) -> Self {
        self.resource_id = resource_id.map(ToString::to_string);
        self.space_id = space_id.map(ToString::to_string);
        self
    }

    /// Attaches a failure detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for harness events.
pub trait EventSink: Send + Sync {
    /// Records an HTTP exchange.
    fn record_request(&self, event: &RequestEvent);

    /// Records token cache activity.
    fn record_auth(&self, _event: &AuthEvent) {}

    /// Records a fixture lifecycle transition.
    fn record_fixture(&self, _event: &FixtureEvent) {}
}

/// Builds the sink selected by configuration.
///
/// # Errors
///
/// Returns an error when the event log file cannot be opened.
pub fn sink_for(target: &EventLogTarget) -> io::Result<Arc<dyn EventSink>> {
    Ok(match target {
        EventLogTarget::Off => Arc::new(NoopEventSink),
        EventLogTarget::Stderr => Arc::new(StderrEventSink),
        EventLogTarget::File(path) => Arc::new(FileEventSink::new(path)?),
    })
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Sink that logs JSON lines to stderr.
pub struct StderrEventSink;

impl StderrEventSink {
    /// Writes one serialized event line.
    fn emit<T: Serialize>(event: &T) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

impl EventSink for StderrEventSink {
    fn record_request(&self, event: &RequestEvent) {
        Self::emit(event);
    }

    fn record_auth(&self, event: &AuthEvent) {
        Self::emit(event);
    }

    fn record_fixture(&self, event: &FixtureEvent) {
        Self::emit(event);
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileEventSink {
    /// Opens the event log in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized event line.
    fn emit<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl EventSink for FileEventSink {
    fn record_request(&self, event: &RequestEvent) {
        self.emit(event);
    }

    fn record_auth(&self, event: &AuthEvent) {
        self.emit(event);
    }

    fn record_fixture(&self, event: &FixtureEvent) {
        self.emit(event);
    }
}

/// No-op sink.
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn record_request(&self, _event: &RequestEvent) {}
}

/// Sink that keeps serialized events in memory for assertions.
#[derive(Default)]
pub struct MemoryEventSink {
    /// Captured events in arrival order.
    events: Mutex<Vec<Value>>,
}

impl MemoryEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of captured events.
    #[must_use]
    pub fn events(&self) -> Vec<Value> {
        self.events.lock().map_or_else(|_| Vec::new(), |events| events.clone())
    }

    /// Returns captured events whose `event` field equals `name`.
    #[must_use]
    pub fn named(&self, name: &str) -> Vec<Value> {
        self.events()
            .into_iter()
            .filter(|event| event.get("event").and_then(Value::as_str) == Some(name))
            .collect()
    }

    /// Stores one serialized event.
    fn push<T: Serialize>(&self, event: &T) {
        if let Ok(value) = serde_json::to_value(event)
            && let Ok(mut events) = self.events.lock()
        {
            events.push(value);
        }
    }
}

impl EventSink for MemoryEventSink {
    fn record_request(&self, event: &RequestEvent) {
        self.push(event);
    }

    fn record_auth(&self, event: &AuthEvent) {
        self.push(event);
    }

    fn record_fixture(&self, event: &FixtureEvent) {
        self.push(event);
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
