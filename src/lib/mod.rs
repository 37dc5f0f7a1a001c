//! Shared utilities for API access, configuration, errors, and logging.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated request setup in features. They do not hold secrets; callers
//! must still avoid logging request bodies, which carry the password.

pub mod api;
pub mod config;
pub mod errors;
pub mod telemetry;

pub use api::ApiClient;
pub use config::AppConfig;
pub use errors::AppError;

/// `User-Agent` sent with every request.
pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
