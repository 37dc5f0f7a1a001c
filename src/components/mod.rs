//! Render models shared by routes.

pub mod alert;

pub use alert::{Alert, AlertKind};
