use thiserror::Error;

/// Failures raised by the HTTP layer and surfaced to the form.
///
/// Form validation problems are not errors in this sense; they are reported
/// per field by [`crate::features::auth::validation::validate`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Message provided by the server for non-success responses, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Http { message, .. } => Some(message),
            _ => None,
        }
    }
}
