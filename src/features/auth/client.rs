//! Client wrapper for the sign-up endpoint. The form controller talks to the
//! [`SignupService`] trait so tests can swap the network out.

use super::types::{SignupPayload, SignupResponse};
use crate::app_lib::{ApiClient, AppError};
use std::future::Future;
use tracing::{info, instrument};

/// Account creation route, relative to the API base URL.
pub const SIGNUP_PATH: &str = "/api/v1/auth/signup";

/// Creates accounts from validated payloads.
pub trait SignupService {
    /// Sends the payload and returns the server response unchanged.
    fn signup(
        &self,
        payload: &SignupPayload,
    ) -> impl Future<Output = Result<SignupResponse, AppError>> + Send;
}

/// [`SignupService`] backed by the HTTP API.
#[derive(Clone, Debug)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Builds the client from environment configuration.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the configured base URL is invalid.
    pub fn from_env() -> Result<Self, AppError> {
        ApiClient::from_env().map(Self::new)
    }
}

impl SignupService for AuthClient {
    #[instrument(skip_all)]
    async fn signup(&self, payload: &SignupPayload) -> Result<SignupResponse, AppError> {
        let response: SignupResponse = self.api.post(SIGNUP_PATH, payload).await?;
        info!(user_id = %response.user.id, "account created");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app_lib::AppConfig, features::auth::types::Goals};
    use anyhow::Result;
    use secrecy::SecretString;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn payload() -> SignupPayload {
        SignupPayload {
            email: "ana@example.com".to_string(),
            password: SecretString::from("Password123".to_string()),
            goals: Some(Goals {
                summary: "Sleep better".to_string(),
            }),
            stage: 2,
        }
    }

    #[tokio::test]
    async fn signup_posts_payload_to_signup_route() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SIGNUP_PATH))
            .and(body_json(json!({
                "email": "ana@example.com",
                "password": "Password123",
                "goals": { "summary": "Sleep better" },
                "stage": 2
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "user": {
                    "id": "0b6a5f0e-3c1d-4f5e-9a43-7d2a1c9e8b10",
                    "email": "ana@example.com",
                    "goals": { "summary": "Sleep better" },
                    "stage": 2,
                    "created_at": "2026-10-17T08:00:00Z"
                },
                "message": "Account created"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(ApiClient::new(&AppConfig::with_base_url(server.uri()))?);
        let response = client.signup(&payload()).await?;

        assert_eq!(response.message, "Account created");
        assert_eq!(response.user.email, "ana@example.com");
        assert_eq!(response.user.stage, 2);
        assert_eq!(response.user.goals, Some(json!({ "summary": "Sleep better" })));
        Ok(())
    }

    #[tokio::test]
    async fn signup_propagates_conflicts() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SIGNUP_PATH))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({ "detail": "Email already registered" })),
            )
            .mount(&server)
            .await;

        let client = AuthClient::new(ApiClient::new(&AppConfig::with_base_url(server.uri()))?);
        let err = client.signup(&payload()).await.unwrap_err();

        assert_eq!(err.server_message(), Some("Email already registered"));
        Ok(())
    }
}
