// crates/spaceboard-harness/tests/common/mod.rs
// ============================================================================
// Module: Stub Backend
// Description: In-process tiny_http stand-in for the Spaceboard RPC surface.
// Purpose: Exercise the harness end to end without a live deployment.
// Dependencies: spaceboard-harness, serde_json, tiny_http
// ============================================================================

//! ## Overview
//! [`StubBackend`] serves the RPC paths the harness uses, keeps resources in
//! memory, records every request, and counts logins per role. It enforces the
//! same contracts the real backend does where the harness depends on them:
//! bearer + `_t` cookie auth, `Current-Space-Id` for tenant-scoped creates,
//! `NOT_FOUND` for missing resources, and refusal to remove a resource that
//! still has live children.

#![allow(
    dead_code,
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::thread::JoinHandle;

use serde_json::Value;
use serde_json::json;
use spaceboard_harness::Credential;
use spaceboard_harness::EventSink;
use spaceboard_harness::HarnessConfig;
use spaceboard_harness::HarnessContext;
use spaceboard_harness::Role;
use tiny_http::Header;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Recorded Data
// ============================================================================

/// One request as the stub received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request path.
    pub path: String,
    /// Headers keyed by lowercase name.
    pub headers: BTreeMap<String, String>,
    /// Raw body text.
    pub raw_body: String,
    /// Body parsed as JSON (`Null` when empty or invalid).
    pub body: Value,
}

impl RecordedRequest {
    /// Returns the `_id` field of the body.
    pub fn target_id(&self) -> Option<&str> {
        self.body.get("_id").and_then(Value::as_str)
    }
}

/// One stored resource.
#[derive(Debug, Clone)]
pub struct StubResource {
    /// Resource kind label.
    pub kind: &'static str,
    /// Parent resource identifier.
    pub parent_id: Option<String>,
    /// Whether the resource still exists.
    pub alive: bool,
    /// Payload returned by `Get*`.
    pub payload: Value,
}

// ============================================================================
// SECTION: State
// ============================================================================

/// Account known to the stub.
struct StubUser {
    role: Role,
    email: String,
    password: String,
}

/// Reply produced by the router.
struct Reply {
    status: u16,
    body: Value,
    cookies: Vec<String>,
}

impl Reply {
    fn ok(payload: Value, kind: &str) -> Self {
        Self {
            status: 200,
            body: json!({"payload": payload, "type": kind}),
            cookies: Vec::new(),
        }
    }

    fn error(status: u16, code: &str) -> Self {
        Self {
            status,
            body: json!({"payload": null, "type": "Error", "error": {"code": code, "fields": []}}),
            cookies: Vec::new(),
        }
    }

    fn field_error(field: &str, code: &str) -> Self {
        Self {
            status: 400,
            body: json!({
                "payload": null,
                "type": "Error",
                "error": {"code": "VALIDATION", "fields": [{"field": field, "codes": [code]}]},
            }),
            cookies: Vec::new(),
        }
    }
}

#[derive(Default)]
struct StubState {
    users: Vec<StubUser>,
    sessions: BTreeMap<String, Role>,
    login_counts: BTreeMap<Role, usize>,
    requests: Vec<RecordedRequest>,
    resources: BTreeMap<String, StubResource>,
    forced: BTreeMap<String, u16>,
    unrouted: BTreeSet<String>,
    forbidden: BTreeMap<(Role, String), u16>,
    cookie_only_login: bool,
    next_id: u64,
}

impl StubState {
    fn with_default_users() -> Self {
        let users = Role::ALL
            .into_iter()
            .map(|role| StubUser {
                role,
                email: default_email(role),
                password: default_password(role),
            })
            .collect();
        Self {
            users,
            ..Self::default()
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn route(&mut self, path: &str, headers: &BTreeMap<String, String>, body: &Value) -> Reply {
        if let Some(status) = self.forced.get(path) {
            return Reply::error(*status, "FORCED");
        }
        if self.unrouted.contains(path) {
            return Reply::error(404, "UNKNOWN_ROUTE");
        }
        if path == "/Login" {
            return self.login(body);
        }
        let Some(role) = self.authenticate(headers) else {
            return Reply::error(401, "UNAUTHENTICATED");
        };
        if let Some(status) = self.forbidden.get(&(role, path.to_string())) {
            return Reply::error(*status, "FORBIDDEN");
        }
        if path == "/Logout" {
            return Reply::ok(json!({}), "Empty");
        }
        if path == "/GetSpaces" {
            let spaces: Vec<Value> = self
                .resources
                .values()
                .filter(|resource| resource.kind == "space" && resource.alive)
                .map(|resource| resource.payload.clone())
                .collect();
            return Reply::ok(Value::Array(spaces), "Space[]");
        }
        if let Some(kind) = path.strip_prefix("/Create") {
            return self.create(kind, headers, body);
        }
        if path.starts_with("/Get") {
            return self.get(body);
        }
        if path.starts_with("/Remove") || path.starts_with("/Archive") {
            return self.remove(body);
        }
        if path.starts_with("/Edit") {
            return self.edit(body);
        }
        Reply::error(404, "UNKNOWN_ROUTE")
    }

    fn login(&mut self, body: &Value) -> Reply {
        let email = body.get("email").and_then(Value::as_str).unwrap_or_default();
        let password = body.get("password").and_then(Value::as_str).unwrap_or_default();
        let Some(role) = self
            .users
            .iter()
            .find(|user| user.email == email && user.password == password)
            .map(|user| user.role)
        else {
            return Reply::error(401, "INVALID_CREDENTIALS");
        };
        let token = format!("tok-{role}-{}", self.next_id());
        self.sessions.insert(token.clone(), role);
        *self.login_counts.entry(role).or_default() += 1;
        let payload = if self.cookie_only_login { json!({}) } else { json!({"token": token}) };
        let mut reply = Reply::ok(payload, "Session");
        reply.cookies.push(format!("_t={token}; Path=/; HttpOnly"));
        reply
    }

    fn authenticate(&self, headers: &BTreeMap<String, String>) -> Option<Role> {
        let bearer = headers.get("authorization")?.strip_prefix("Bearer ")?;
        let cookie = headers.get("cookie")?;
        let cookie_token = cookie
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == "_t")
            .map(|(_, value)| value)?;
        if cookie_token != bearer {
            return None;
        }
        self.sessions.get(bearer).copied()
    }

    fn alive(&self, id: &str) -> bool {
        self.resources.get(id).is_some_and(|resource| resource.alive)
    }

    fn create(&mut self, kind: &str, headers: &BTreeMap<String, String>, body: &Value) -> Reply {
        let (label, parent_field) = match kind {
            "Space" => ("space", None),
            "Project" => ("project", None),
            "Board" => ("board", Some("projectId")),
            "Document" => ("document", Some("containerId")),
            "Task" => ("task", Some("boardId")),
            "PersonalAccessToken" => ("personal_access_token", None),
            _ => return Reply::error(404, "UNKNOWN_ROUTE"),
        };
        let name = body.get("name").and_then(Value::as_str).unwrap_or_default();
        if name.is_empty() {
            return Reply::field_error("name", "REQUIRED");
        }
        let tenant = !matches!(label, "space" | "personal_access_token");
        let space_id = headers.get("current-space-id").cloned();
        if tenant {
            match &space_id {
                Some(space) if self.alive(space) => {}
                _ => return Reply::error(400, "SPACE_REQUIRED"),
            }
        }
        let parent_id = match parent_field {
            Some(field) => {
                let Some(parent) = body.get(field).and_then(Value::as_str) else {
                    return Reply::field_error(field, "REQUIRED");
                };
                if !self.alive(parent) {
                    return Reply::error(404, "NOT_FOUND");
                }
                Some(parent.to_string())
            }
            None if label == "project" => space_id,
            None => None,
        };
        let serial = self.next_id();
        let id = format!("{label}-{serial}");
        let mut payload = body.as_object().cloned().unwrap_or_default();
        payload.insert("_id".to_string(), json!(id));
        if label == "board" && payload.get("groups").is_none_or(Value::is_null) {
            payload.insert("groups".to_string(), json!([{"_id": format!("{id}-g1"), "name": "To do"}]));
        }
        if label == "personal_access_token" {
            payload.insert("token".to_string(), json!(format!("pat-secret-{serial}")));
        }
        let payload = Value::Object(payload);
        self.resources.insert(
            id,
            StubResource {
                kind: label,
                parent_id,
                alive: true,
                payload: payload.clone(),
            },
        );
        Reply::ok(payload, label)
    }

    fn get(&self, body: &Value) -> Reply {
        let id = body.get("_id").and_then(Value::as_str).unwrap_or_default();
        match self.resources.get(id) {
            Some(resource) if resource.alive => Reply::ok(resource.payload.clone(), resource.kind),
            _ => Reply::error(404, "NOT_FOUND"),
        }
    }

    fn remove(&mut self, body: &Value) -> Reply {
        let id = body.get("_id").and_then(Value::as_str).unwrap_or_default().to_string();
        if !self.alive(&id) {
            return Reply::error(404, "NOT_FOUND");
        }
        let has_children = self
            .resources
            .values()
            .any(|resource| resource.alive && resource.parent_id.as_deref() == Some(id.as_str()));
        if has_children {
            return Reply::error(409, "HAS_ACTIVE_CHILDREN");
        }
        if let Some(resource) = self.resources.get_mut(&id) {
            resource.alive = false;
        }
        Reply::ok(json!({"_id": id}), "Removed")
    }

    fn edit(&mut self, body: &Value) -> Reply {
        let id = body.get("_id").and_then(Value::as_str).unwrap_or_default();
        let Some(resource) = self.resources.get_mut(id).filter(|resource| resource.alive) else {
            return Reply::error(404, "NOT_FOUND");
        };
        if let (Some(target), Some(changes)) = (resource.payload.as_object_mut(), body.as_object()) {
            for (key, value) in changes {
                target.insert(key.clone(), value.clone());
            }
        }
        Reply::ok(resource.payload.clone(), resource.kind)
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Default login email for `role`.
pub fn default_email(role: Role) -> String {
    format!("{role}@example.test")
}

/// Default login password for `role`.
pub fn default_password(role: Role) -> String {
    format!("pw-{role}")
}

/// Running stub backend; stops when dropped.
pub struct StubBackend {
    server: Arc<Server>,
    state: Arc<Mutex<StubState>>,
    handle: Option<JoinHandle<()>>,
    url: String,
}

impl StubBackend {
    /// Starts the stub on an ephemeral local port.
    pub fn start() -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let state = Arc::new(Mutex::new(StubState::with_default_users()));
        let worker_server = Arc::clone(&server);
        let worker_state = Arc::clone(&state);
        let handle = thread::spawn(move || {
            for request in worker_server.incoming_requests() {
                serve(&worker_state, request);
            }
        });
        Self {
            server,
            state,
            handle: Some(handle),
            url: format!("http://{addr}"),
        }
    }

    /// Base URL of the stub.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Configuration with every default credential.
    pub fn config(&self) -> HarnessConfig {
        Role::ALL.into_iter().fold(HarnessConfig::new(&self.url).unwrap(), |config, role| {
            config.with_credential(Credential::new(role, default_email(role), default_password(role)))
        })
    }

    /// Context with every default credential and a discarding sink.
    pub fn context(&self) -> HarnessContext {
        HarnessContext::new(self.config())
    }

    /// Context reporting to `sink`.
    pub fn context_with_sink(&self, sink: Arc<dyn EventSink>) -> HarnessContext {
        HarnessContext::with_sink(self.config(), sink)
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Paths of every request received so far.
    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|request| request.path).collect()
    }

    /// Requests received for `path`.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|request| request.path == path).collect()
    }

    /// Number of successful logins for `role`.
    pub fn login_count(&self, role: Role) -> usize {
        self.state.lock().unwrap().login_counts.get(&role).copied().unwrap_or_default()
    }

    /// Stored resource by identifier.
    pub fn resource(&self, id: &str) -> Option<StubResource> {
        self.state.lock().unwrap().resources.get(id).cloned()
    }

    /// Returns true while the resource exists.
    pub fn is_alive(&self, id: &str) -> bool {
        self.state.lock().unwrap().alive(id)
    }

    /// Deletes a resource behind the harness's back.
    pub fn delete_out_of_band(&self, id: &str) {
        if let Some(resource) = self.state.lock().unwrap().resources.get_mut(id) {
            resource.alive = false;
        }
    }

    /// Answers every request to `path` with `status`.
    pub fn force_status(&self, path: &str, status: u16) {
        self.state.lock().unwrap().forced.insert(path.to_string(), status);
    }

    /// Stops forcing a status for `path`.
    pub fn clear_forced(&self, path: &str) {
        self.state.lock().unwrap().forced.remove(path);
    }

    /// Answers `path` as an unknown route.
    pub fn unroute(&self, path: &str) {
        self.state.lock().unwrap().unrouted.insert(path.to_string());
    }

    /// Answers `path` with `status` when called as `role`.
    pub fn forbid(&self, role: Role, path: &str, status: u16) {
        self.state.lock().unwrap().forbidden.insert((role, path.to_string()), status);
    }

    /// Returns the session token only through `Set-Cookie`.
    pub fn set_cookie_only_login(&self, enabled: bool) {
        self.state.lock().unwrap().cookie_only_login = enabled;
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Reads, routes, and answers one request.
fn serve(state: &Mutex<StubState>, mut request: Request) {
    let mut raw_body = String::new();
    let _ = request.as_reader().read_to_string(&mut raw_body);
    let headers: BTreeMap<String, String> = request
        .headers()
        .iter()
        .map(|header| {
            (header.field.as_str().as_str().to_ascii_lowercase(), header.value.as_str().to_string())
        })
        .collect();
    let path = request.url().to_string();
    let body: Value = serde_json::from_str(&raw_body).unwrap_or(Value::Null);
    let reply = {
        let mut state = state.lock().unwrap();
        state.requests.push(RecordedRequest {
            path: path.clone(),
            headers: headers.clone(),
            raw_body,
            body: body.clone(),
        });
        state.route(&path, &headers, &body)
    };
    let mut response = Response::from_string(reply.body.to_string())
        .with_status_code(reply.status)
        .with_header(Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap());
    for cookie in reply.cookies {
        response = response.with_header(Header::from_bytes(&b"Set-Cookie"[..], cookie.as_bytes()).unwrap());
    }
    let _ = request.respond(response);
}
