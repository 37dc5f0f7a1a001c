//! HTTP helper for JSON APIs with consistent error handling. Feature clients
//! use it to avoid duplicating request setup. Request bodies may carry
//! credentials, so they are never logged.

use super::{APP_USER_AGENT, config::AppConfig, errors::AppError};
use reqwest::{
    Client, Response,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

/// Message used when a failed response carries no usable `detail`.
pub const GENERIC_ERROR_MESSAGE: &str = "Request failed";

/// Error body returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// JSON client bound to one API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for the given configuration.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the base URL is invalid or the HTTP
    /// client cannot be created.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        config.validate()?;

        let mut builder = Client::builder().user_agent(APP_USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim().to_string(),
        })
    }

    /// Builds a client from the environment, see [`AppConfig::load`].
    ///
    /// # Errors
    /// Same as [`ApiClient::new`].
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(&AppConfig::load())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts `body` as JSON to `path` and parses the JSON response.
    ///
    /// # Errors
    /// `Serialization` if the body cannot be encoded, `Network`/`Timeout` on
    /// transport failures, `Http` on non-success statuses (carrying the
    /// server `detail` or a generic message) and `Parse` when a success body
    /// is not the expected JSON.
    #[instrument(skip(self, body))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = build_url_with_base(&self.base_url, path);
        let payload = serde_json::to_vec(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;

        debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(payload)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with the server `detail`.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();

    if status.is_success() {
        let bytes = response.bytes().await.map_err(map_request_error)?;
        serde_json::from_slice(&bytes)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let bytes = response.bytes().await.unwrap_or_default();
        let message = error_message(&bytes);
        warn!(status = status.as_u16(), "request failed: {message}");
        Err(AppError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// Extracts `detail` from an error body as sent, falling back to a generic
/// message when the body is unparsable or the detail is missing or blank.
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.detail)
        .filter(|detail| !detail.trim().is_empty())
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::{Value, json};
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&AppConfig::with_base_url(server.uri())).unwrap()
    }

    #[test]
    fn build_url_joins_slashes() {
        assert_eq!(
            build_url_with_base("http://localhost:8000/", "/api/v1/auth/signup"),
            "http://localhost:8000/api/v1/auth/signup"
        );
        assert_eq!(
            build_url_with_base("http://localhost:8000", "api/v1/auth/signup"),
            "http://localhost:8000/api/v1/auth/signup"
        );
        assert_eq!(build_url_with_base("  ", "/health"), "/health");
    }

    #[test]
    fn error_message_prefers_detail() {
        assert_eq!(
            error_message(br#"{"detail":"Email already registered"}"#),
            "Email already registered"
        );
        assert_eq!(error_message(br#"{"detail":"  padded  "}"#), "  padded  ");
    }

    #[test]
    fn error_message_falls_back_when_detail_is_missing_or_unusable() {
        assert_eq!(error_message(b""), GENERIC_ERROR_MESSAGE);
        assert_eq!(error_message(b"<html>bad gateway</html>"), GENERIC_ERROR_MESSAGE);
        assert_eq!(error_message(br#"{"error":"nope"}"#), GENERIC_ERROR_MESSAGE);
        assert_eq!(error_message(br#"{"detail":"   "}"#), GENERIC_ERROR_MESSAGE);
        assert_eq!(
            error_message(br#"{"detail":[{"msg":"field required"}]}"#),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn long_detail_passes_through_unchanged() {
        let long = "x".repeat(250);
        let body = serde_json::to_vec(&json!({ "detail": long })).unwrap();
        assert_eq!(error_message(&body), long);
    }

    #[test]
    fn new_rejects_invalid_base_url() {
        let result = ApiClient::new(&AppConfig::with_base_url("localhost"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn post_sends_json_and_parses_success() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/echo"))
            .and(header("content-type", "application/json"))
            .and(header("user-agent", APP_USER_AGENT))
            .and(body_json(json!({ "hello": "world" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let response: Value = client.post("/api/v1/echo", &json!({ "hello": "world" })).await?;
        assert_eq!(response, json!({ "ok": true }));
        Ok(())
    }

    #[tokio::test]
    async fn post_surfaces_server_detail() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/echo"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({ "detail": "Email already registered" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .post::<_, Value>("/api/v1/echo", &json!({}))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AppError::Http {
                status: 409,
                message: "Email already registered".to_string(),
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn post_uses_generic_message_for_unparsable_error_body() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .post::<_, Value>("/api/v1/echo", &json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.server_message(), Some(GENERIC_ERROR_MESSAGE));
        Ok(())
    }

    #[tokio::test]
    async fn post_reports_parse_errors_on_success_path() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .post::<_, Value>("/api/v1/echo", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
        Ok(())
    }

    #[tokio::test]
    async fn post_reports_network_errors() {
        // Port 9 (discard) is closed on test hosts; the connection is refused.
        let client = ApiClient::new(&AppConfig::with_base_url("http://127.0.0.1:9")).unwrap();
        let err = client
            .post::<_, Value>("/api/v1/echo", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Network(_) | AppError::Timeout(_)));
    }
}
