//! Request and response types for the sign-up API. The payload carries the
//! plain password, so it must never be logged; its `Debug` output redacts it.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

/// Structured goals sent with the sign-up request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goals {
    pub summary: String,
}

/// Network-ready sign-up request body.
#[derive(Debug, Serialize)]
pub struct SignupPayload {
    pub email: String,
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Goals>,
    pub stage: u8,
}

/// Account returned by the API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub goals: Option<serde_json::Value>,
    /// Kept wide so an unexpected server value never fails decoding.
    pub stage: i64,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SignupResponse {
    pub user: User,
    pub message: String,
}

fn serialize_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}
