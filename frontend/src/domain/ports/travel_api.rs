//! Driven port for the Nomado backend HTTP API.
//!
//! The port speaks raw JSON so the typed services (`CatalogueService`,
//! `AuthService`) own response shapes and envelope normalisation, while
//! adapters own transport details only.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

/// Fallback text shown when the backend gives no usable reason.
pub const GENERIC_REQUEST_FAILURE: &str = "Something went wrong. Please try again.";

const UNREACHABLE_MESSAGE: &str = "Unable to reach the server. Please try again later.";

define_port_error! {
    /// Errors surfaced while calling the backend API.
    pub enum ApiError {
        /// No response reached the client.
        Transport { message: String } =>
            "api transport failed: {message}",
        /// The configured request timeout elapsed.
        Timeout { message: String } =>
            "api request timed out: {message}",
        /// The backend answered with a non-2xx status.
        Request { status: u16, message: String } =>
            "api request failed with status {status}: {message}",
        /// A 2xx response body was not the expected JSON.
        Decode { message: String } =>
            "api response decode failed: {message}",
        /// The client refused to build the request.
        InvalidRequest { message: String } =>
            "api request invalid: {message}",
    }
}

impl ApiError {
    /// Text suitable for notifications and error panels.
    ///
    /// Request failures surface the backend's own `message`; everything else
    /// maps to a fixed sentence so transport noise never reaches the page.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::ports::ApiError;
    ///
    /// let err = ApiError::request(500_u16, "db down");
    /// assert_eq!(err.user_message(), "db down");
    /// ```
    pub fn user_message(&self) -> &str {
        match self {
            Self::Request { message, .. } if !message.trim().is_empty() => message.as_str(),
            Self::Transport { .. } | Self::Timeout { .. } => UNREACHABLE_MESSAGE,
            _ => GENERIC_REQUEST_FAILURE,
        }
    }

    /// HTTP status for request failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Port for issuing JSON requests against the backend.
///
/// Paths are relative to the adapter's base URL (`/destinations`,
/// `/auth/login`, ...). Query pairs are URL-encoded by the adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TravelApi: Send + Sync {
    /// Issue a `GET` and decode the JSON body.
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, ApiError>;

    /// Issue a `POST` with a JSON body and decode the JSON response.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError>;
}

/// One request observed by [`FixtureTravelApi`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// `GET` or `POST`.
    pub method: &'static str,
    /// Path as passed to the port.
    pub path: String,
    /// Query pairs for `GET`, body for `POST`.
    pub payload: Value,
}

/// In-memory API returning canned responses keyed by path.
///
/// Unknown paths answer with a 404 request error carrying
/// `"not found"`, mirroring how the backend reports missing routes.
#[derive(Debug, Default)]
pub struct FixtureTravelApi {
    responses: BTreeMap<String, Result<Value, ApiError>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FixtureTravelApi {
    /// Create an empty fixture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for every request to `path`.
    #[must_use]
    pub fn with_response(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(path.to_owned(), Ok(body));
        self
    }

    /// Fail every request to `path` with `error`.
    #[must_use]
    pub fn with_error(mut self, path: &str, error: ApiError) -> Self {
        self.responses.insert(path.to_owned(), Err(error));
        self
    }

    /// Requests observed so far, in call order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn respond(&self, request: RecordedRequest) -> Result<Value, ApiError> {
        let response = self
            .responses
            .get(&request.path)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::request(404_u16, "not found")));
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request);
        response
    }
}

#[async_trait]
impl TravelApi for FixtureTravelApi {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, ApiError> {
        let payload = query
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect::<serde_json::Map<_, _>>();
        self.respond(RecordedRequest {
            method: "GET",
            path: path.to_owned(),
            payload: Value::Object(payload),
        })
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.respond(RecordedRequest {
            method: "POST",
            path: path.to_owned(),
            payload: body.clone(),
        })
    }
}
