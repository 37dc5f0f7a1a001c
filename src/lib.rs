//! Sign-up flow for the Noria wellness client.
//!
//! The crate is split the same way the web client is: shared plumbing in
//! [`app_lib`] (configuration, errors, the JSON HTTP client, logging
//! bootstrap), the auth feature in [`features::auth`] (validation schema,
//! wire types, the sign-up service and the session store), render models in
//! [`components`], and the form controller in [`routes::signup`].
//!
//! Flow Overview: the form validates its values locally, posts the payload to
//! `/api/v1/auth/signup`, stores the returned user in the [`AuthContext`] and
//! shows the server message. Failures never touch the session.

#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod components;
pub mod features;
pub mod routes;

pub use app_lib::{ApiClient, AppConfig, AppError};
pub use features::auth::{
    client::{AuthClient, SignupService},
    state::AuthContext,
    types::{Goals, SignupPayload, SignupResponse, User},
    validation::{Field, FieldErrors, SignupFormValues, SignupInput, validate},
};
pub use routes::signup::{FormStatus, SignupPage, SignupView};
