// crates/spaceboard-harness/src/client.rs
// ============================================================================
// Module: Session Client
// Description: Blocking authenticated HTTP client bound to one base URL.
// Purpose: Send RPC requests with bearer and cookie auth applied uniformly.
// Dependencies: reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! A [`SessionClient`] owns one blocking `reqwest` client, a base URL, and a
//! set of default headers. Authentication is rebound with
//! [`SessionClient::set_auth_header`], which replaces the bearer header and
//! the `_t` cookie together so the two can never disagree.
//!
//! Responses are returned as [`ApiResponse`] regardless of status; only
//! transport failures are errors. Nothing is retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::header::AUTHORIZATION;
use reqwest::header::COOKIE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::header::SET_COOKIE;
use reqwest::redirect::Policy;
use serde_json::Value;
use url::Url;

use crate::endpoints::EndpointDescriptor;
use crate::endpoints::SPACE_HEADER;
use crate::error::HarnessError;
use crate::events::EventSink;
use crate::events::RequestEvent;
use crate::tokens::Token;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Session cookie name shared by login responses and authenticated requests.
pub const SESSION_COOKIE: &str = "_t";

/// Envelope error code for a resource that no longer exists.
pub const NOT_FOUND_CODE: &str = "NOT_FOUND";

// ============================================================================
// SECTION: Session Client
// ============================================================================

/// Blocking HTTP client with default headers and optional session auth.
#[derive(Clone)]
pub struct SessionClient {
    /// Base URL without a trailing slash.
    base_url: String,
    /// Underlying blocking client.
    http: Client,
    /// Default headers keyed by lowercase name.
    default_headers: BTreeMap<String, String>,
    /// Destination for request events.
    sink: Arc<dyn EventSink>,
}

impl fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionClient {
    /// Builds a client for `base_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidUrl`] for non-HTTP schemes and
    /// [`HarnessError::ClientBuild`] when the TLS stack cannot initialize.
    pub fn new(
        base_url: &Url,
        timeout: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, HarnessError> {
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(HarnessError::InvalidUrl {
                url: base_url.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }
        let http = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|err| HarnessError::ClientBuild(err.to_string()))?;
        Ok(Self {
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            http,
            default_headers: BTreeMap::new(),
            sink,
        })
    }

    /// Returns the sink request events are recorded to.
    #[must_use]
    pub fn sink(&self) -> &Arc<dyn EventSink> {
        &self.sink
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Binds `token` as both the bearer header and the session cookie.
    pub fn set_auth_header(&mut self, token: &Token) {
        self.default_headers
            .insert(AUTHORIZATION.as_str().to_string(), format!("Bearer {}", token.as_str()));
        self.default_headers
            .insert(COOKIE.as_str().to_string(), format!("{SESSION_COOKIE}={}", token.as_str()));
    }

    /// Removes any bound session.
    pub fn clear_auth(&mut self) {
        self.default_headers.remove(AUTHORIZATION.as_str());
        self.default_headers.remove(COOKIE.as_str());
    }

    /// Returns true when a session token is bound.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.default_headers.contains_key(AUTHORIZATION.as_str())
    }

    /// Sets a default header sent with every request.
    pub fn set_default_header(&mut self, name: &str, value: impl Into<String>) {
        self.default_headers.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Returns the default headers, keyed by lowercase name.
    #[must_use]
    pub const fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    /// POSTs `json` to `path` with defaults merged under `headers`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on invalid headers or transport failure.
    /// Non-2xx statuses are returned as `Ok`.
    pub fn post(
        &self,
        path: &str,
        json: Option<&Value>,
        headers: &BTreeMap<String, String>,
    ) -> Result<ApiResponse, HarnessError> {
        let url = self.url_for(path);
        let mut request = self.http.post(url);
        if let Some(json) = json {
            request = request.json(json);
        }
        self.execute("POST", path, request, headers)
    }

    /// GETs `path` with defaults merged under `headers`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on invalid headers or transport failure.
    pub fn get(
        &self,
        path: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<ApiResponse, HarnessError> {
        let url = self.url_for(path);
        self.execute("GET", path, self.http.get(url), headers)
    }

    /// Sends a prepared endpoint descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on invalid headers or transport failure.
    pub fn send(&self, descriptor: &EndpointDescriptor) -> Result<ApiResponse, HarnessError> {
        self.post(descriptor.path(), descriptor.json(), descriptor.headers())
    }

    /// Joins the base URL and an RPC path.
    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Applies merged headers, sends, and records the exchange.
    fn execute(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
        headers: &BTreeMap<String, String>,
    ) -> Result<ApiResponse, HarnessError> {
        let merged = self.merge_headers(headers);
        let space_id = merged.get(&SPACE_HEADER.to_ascii_lowercase()).cloned();
        let header_map = header_map(&merged)?;
        let mut event = RequestEvent::new(method, path, space_id);
        let started = Instant::now();
        let result = request.headers(header_map).send().and_then(|response| {
            let status = response.status().as_u16();
            let headers = response.headers().clone();
            response.text().map(|body| ApiResponse::from_parts(status, headers, body))
        });
        event.duration_ms = started.elapsed().as_millis();
        match result {
            Ok(response) => {
                event.status = Some(response.status());
                self.sink.record_request(&event);
                Ok(response)
            }
            Err(source) => {
                event.error = Some(source.to_string());
                self.sink.record_request(&event);
                Err(HarnessError::Transport {
                    path: path.to_string(),
                    source,
                })
            }
        }
    }

    /// Merges defaults with per-call headers; per-call values win.
    fn merge_headers(&self, headers: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut merged = self.default_headers.clone();
        for (name, value) in headers {
            merged.insert(name.to_ascii_lowercase(), value.clone());
        }
        merged
    }
}

/// Converts a name → value map into validated HTTP headers.
fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, HarnessError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|err| HarnessError::InvalidHeader {
                name: name.clone(),
                reason: err.to_string(),
            })?;
        let mut header_value =
            HeaderValue::from_str(value).map_err(|err| HarnessError::InvalidHeader {
                name: name.clone(),
                reason: err.to_string(),
            })?;
        if header_name == AUTHORIZATION || header_name == COOKIE {
            header_value.set_sensitive(true);
        }
        map.insert(header_name, header_value);
    }
    Ok(map)
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Status, headers, and body of one backend response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    status: u16,
    /// Response headers.
    headers: HeaderMap,
    /// Raw body text.
    body: String,
    /// Body parsed as JSON, when it is JSON.
    json: Option<Value>,
}

impl ApiResponse {
    /// Assembles a response from its parts.
    #[must_use]
    pub fn from_parts(status: u16, headers: HeaderMap, body: String) -> Self {
        let json = serde_json::from_str(&body).ok();
        Self {
            status,
            headers,
            body,
            json,
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Returns the body as JSON, when it parsed.
    #[must_use]
    pub const fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Returns the envelope `payload`.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        self.json.as_ref()?.get("payload")
    }

    /// Returns the envelope `type`.
    #[must_use]
    pub fn response_type(&self) -> Option<&str> {
        self.json.as_ref()?.get("type")?.as_str()
    }

    /// Returns the envelope `error.code`.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.json.as_ref()?.get("error")?.get("code")?.as_str()
    }

    /// Returns the validation codes reported for `field`.
    #[must_use]
    pub fn field_error_codes(&self, field: &str) -> Vec<&str> {
        let Some(fields) = self
            .json
            .as_ref()
            .and_then(|json| json.get("error"))
            .and_then(|error| error.get("fields"))
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };
        fields
            .iter()
            .filter(|entry| entry.get("field").and_then(Value::as_str) == Some(field))
            .filter_map(|entry| entry.get("codes").and_then(Value::as_array))
            .flatten()
            .filter_map(Value::as_str)
            .collect()
    }

    /// Returns `payload._id`, when present and non-empty.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.payload()?.get("_id")?.as_str().filter(|id| !id.is_empty())
    }

    /// Returns true when the envelope reports the resource as missing.
    ///
    /// A bare 404 is not enough: unknown routes and proxies answer 404 too.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.error_code() == Some(NOT_FOUND_CODE)
    }

    /// Returns the value of cookie `name` from any `Set-Cookie` header.
    #[must_use]
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|cookie| cookie.split(';').next())
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| key.trim() == name)
            .map(|(_, value)| value.trim().to_string())
    }

    /// Fails unless the status equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::UnexpectedStatus`] with the body attached.
    pub fn expect_status(&self, operation: &str, expected: u16) -> Result<&Self, HarnessError> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(HarnessError::UnexpectedStatus {
                operation: operation.to_string(),
                expected,
                status: self.status,
                body: self.body.clone(),
            })
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
