//! Auth feature covering sign-up validation, the sign-up API call, and the
//! in-memory session. It keeps account logic out of the form controller and
//! must stay aligned with the backend payload shapes. Passwords pass through
//! here, so nothing in this module logs request bodies.
//!
//! Flow Overview: `validation` turns raw form values into a `SignupInput`,
//! which becomes a `SignupPayload`; `client` posts it and returns the
//! `SignupResponse`; `state` keeps the returned user.

pub mod client;
pub mod state;
pub mod types;
pub mod validation;
