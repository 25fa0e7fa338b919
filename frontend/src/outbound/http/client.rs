//! Reqwest-backed Nomado API client.
//!
//! This adapter owns transport details only: URL assembly, bearer headers,
//! status and transport error mapping, and JSON decoding. Envelope handling
//! lives in the domain services.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, warn};

use super::dto::ErrorBodyDto;
use crate::domain::ports::{ApiError, TokenSource, TravelApi};

/// API adapter issuing requests relative to one base URL.
pub struct HttpTravelApi {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenSource>,
}

impl HttpTravelApi {
    /// Build an adapter, optionally bounding every request by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        tokens: Arc<dyn TokenSource>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
            tokens,
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(reqwest::header::ACCEPT, "application/json");
        match self.tokens.bearer_token() {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    async fn execute(
        &self,
        method: &'static str,
        request: RequestBuilder,
    ) -> Result<Value, ApiError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let url = response.url().path().to_owned();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(method, path = %url, status = status.as_u16(), "api response received");

        if !status.is_success() {
            let error = map_status_error(status, body.as_ref());
            warn!(method, path = %url, error = %error, "api request failed");
            return Err(error);
        }
        parse_body(body.as_ref())
    }
}

#[async_trait]
impl TravelApi for HttpTravelApi {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, ApiError> {
        let url = build_url(&self.base_url, path, query)?;
        let request = self.authorise(self.client.get(url));
        self.execute("GET", request).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = build_url(&self.base_url, path, &[])?;
        let request = self.authorise(self.client.post(url)).json(body);
        self.execute("POST", request).await
    }
}

fn build_url(base: &Url, path: &str, query: &[(String, String)]) -> Result<Url, ApiError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined)
        .map_err(|error| ApiError::invalid_request(format!("invalid url {joined}: {error}")))?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|error| ApiError::decode(format!("invalid JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::timeout(error.to_string())
    } else if error.is_builder() {
        ApiError::invalid_request(error.to_string())
    } else {
        ApiError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBodyDto>(body)
        .ok()
        .and_then(ErrorBodyDto::into_message)
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
    ApiError::request(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    fn base(raw: &str) -> Url {
        Url::parse(raw).expect("base url")
    }

    #[rstest]
    #[case::leading_slash("http://localhost:8080/api", "/destinations")]
    #[case::bare_path("http://localhost:8080/api", "destinations")]
    #[case::trailing_base_slash("http://localhost:8080/api/", "/destinations")]
    fn urls_keep_the_base_path(#[case] raw_base: &str, #[case] path: &str) {
        let url = build_url(&base(raw_base), path, &[]).expect("url");
        assert_eq!(url.as_str(), "http://localhost:8080/api/destinations");
    }

    #[test]
    fn query_pairs_are_encoded() {
        let query = vec![
            ("q".to_owned(), "sea & sun".to_owned()),
            ("page".to_owned(), "2".to_owned()),
        ];
        let url = build_url(&base("http://localhost:8080/api"), "/destinations", &query)
            .expect("url");
        assert_eq!(url.query(), Some("q=sea+%26+sun&page=2"));
    }

    #[rstest]
    #[case::backend_message(b"{\"message\":\"db down\"}".as_slice(), "db down")]
    #[case::blank_message(b"{\"message\":\"  \"}".as_slice(), "request failed with status 500")]
    #[case::no_message(b"{\"error\":true}".as_slice(), "request failed with status 500")]
    #[case::not_json(b"<html>oops</html>".as_slice(), "request failed with status 500")]
    fn status_errors_prefer_the_backend_message(#[case] body: &[u8], #[case] expected: &str) {
        let error = map_status_error(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert_eq!(error, ApiError::request(500_u16, expected));
    }

    #[rstest]
    #[case::empty(b"".as_slice())]
    #[case::whitespace(b" \n".as_slice())]
    fn empty_success_bodies_decode_as_null(#[case] body: &[u8]) {
        assert_eq!(parse_body(body).expect("null"), Value::Null);
    }

    #[test]
    fn malformed_success_bodies_are_decode_errors() {
        let error = parse_body(b"{\"data\":").expect_err("truncated");
        assert!(matches!(error, ApiError::Decode { .. }));
    }
}
