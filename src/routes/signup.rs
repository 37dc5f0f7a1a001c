//! Signup route controller. It validates inputs locally, sends the payload
//! through a [`SignupService`], stores the created user in the session and
//! records the message to show.
//!
//! Flow Overview: Editing → Submitting (only when the schema accepts the
//! values) → Success or Failed. A new attempt from Success or Failed clears
//! the previous messages before validating again.

use crate::{
    app_lib::AppError,
    components::Alert,
    features::auth::{
        client::SignupService,
        state::AuthContext,
        types::{SignupPayload, SignupResponse},
        validation::{Field, FieldErrors, SignupFormValues, validate},
    },
};
use tracing::{debug, instrument, warn};

pub const SUBMIT_LABEL: &str = "Create account";
pub const SUBMITTING_LABEL: &str = "Creating account...";
pub const PASSWORD_HINT: &str =
    "Must be at least 8 characters and contain upper, lower, and numeric characters.";
/// Shown when a failure carries no server message.
pub const FALLBACK_ERROR: &str = "Unable to create account";

/// An entry of the stage selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageOption {
    pub value: u8,
    pub label: &'static str,
}

pub const STAGE_OPTIONS: [StageOption; 3] = [
    StageOption {
        value: 1,
        label: "Stage 1 – Getting Started",
    },
    StageOption {
        value: 2,
        label: "Stage 2 – Building Momentum",
    },
    StageOption {
        value: 3,
        label: "Stage 3 – Thriving",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitting,
    Success,
    Failed,
}

/// Everything the form renders for its current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupView {
    /// First message of each failing field, in field order.
    pub field_errors: Vec<(Field, &'static str)>,
    pub password_hint: &'static str,
    pub stage_options: &'static [StageOption],
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub alert: Option<Alert>,
}

impl SignupView {
    #[must_use]
    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        self.field_errors
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, message)| *message)
    }
}

/// Signup form state machine bound to a service and a session.
#[derive(Debug)]
pub struct SignupPage<S> {
    service: S,
    auth: AuthContext,
    values: SignupFormValues,
    field_errors: FieldErrors,
    status: FormStatus,
    success: Option<String>,
    error: Option<String>,
}

impl<S: SignupService> SignupPage<S> {
    #[must_use]
    pub fn new(service: S, auth: AuthContext) -> Self {
        Self {
            service,
            auth,
            values: SignupFormValues::default(),
            field_errors: FieldErrors::default(),
            status: FormStatus::Editing,
            success: None,
            error: None,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.values.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.values.password = password.into();
    }

    pub fn set_goals(&mut self, goals: impl Into<String>) {
        self.values.goals = Some(goals.into());
    }

    /// Stores the raw selector value; coercion happens on submit.
    pub fn set_stage(&mut self, stage: impl Into<String>) {
        self.values.stage = Some(stage.into());
    }

    pub fn set_consent(&mut self, consent: bool) {
        self.values.consent = consent;
    }

    #[must_use]
    pub fn values(&self) -> &SignupFormValues {
        &self.values
    }

    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.status
    }

    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    #[must_use]
    pub fn success_message(&self) -> Option<&str> {
        self.success.as_deref()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_submit_disabled(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    #[must_use]
    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Starts an attempt. Returns the payload to send, or `None` when a
    /// request is already pending or the values fail validation.
    pub fn begin_submit(&mut self) -> Option<SignupPayload> {
        if self.status == FormStatus::Submitting {
            debug!("signup already pending, ignoring submit");
            return None;
        }

        self.success = None;
        self.error = None;

        match validate(&self.values) {
            Ok(input) => {
                self.field_errors = FieldErrors::default();
                self.status = FormStatus::Submitting;
                Some(input.into_payload())
            }
            Err(errors) => {
                debug!(fields = ?errors.fields().collect::<Vec<_>>(), "signup form rejected");
                self.field_errors = errors;
                self.status = FormStatus::Editing;
                None
            }
        }
    }

    /// Applies the outcome of the pending request.
    pub fn finish_submit(&mut self, result: Result<SignupResponse, AppError>) {
        if self.status != FormStatus::Submitting {
            warn!("signup result arrived without a pending request, ignoring");
            return;
        }

        match result {
            Ok(response) => {
                self.auth.set_user(response.user);
                self.success = Some(response.message);
                self.status = FormStatus::Success;
            }
            Err(err) => {
                warn!("signup failed: {err}");
                self.error = Some(format_error(&err));
                self.status = FormStatus::Failed;
            }
        }
    }

    /// Abandons the pending request and returns the form to Editing.
    pub fn cancel_submit(&mut self) {
        if self.status == FormStatus::Submitting {
            debug!("pending signup cancelled");
            self.status = FormStatus::Editing;
        }
    }

    /// Validates, sends, and applies the result in one go. Dropping the
    /// returned future before it completes leaves the form Failed.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> FormStatus {
        let Some(payload) = self.begin_submit() else {
            return self.status;
        };

        let pending = PendingSubmit {
            status: &mut self.status,
            error: &mut self.error,
        };
        let result = self.service.signup(&payload).await;
        pending.disarm();

        self.finish_submit(result);

        self.status
    }

    #[must_use]
    pub fn view(&self) -> SignupView {
        let field_errors = self
            .field_errors
            .fields()
            .filter_map(|field| self.field_errors.first(field).map(|message| (field, message)))
            .collect();

        let alert = match (&self.error, &self.success) {
            (Some(error), _) => Some(Alert::error(error.clone())),
            (None, Some(success)) => Some(Alert::success(success.clone())),
            (None, None) => None,
        };

        let submitting = self.is_submit_disabled();

        SignupView {
            field_errors,
            password_hint: PASSWORD_HINT,
            stage_options: &STAGE_OPTIONS,
            submit_label: if submitting {
                SUBMITTING_LABEL
            } else {
                SUBMIT_LABEL
            },
            submit_disabled: submitting,
            alert,
        }
    }
}

/// Marks the form Failed if a submission is dropped mid-flight.
struct PendingSubmit<'a> {
    status: &'a mut FormStatus,
    error: &'a mut Option<String>,
}

impl PendingSubmit<'_> {
    fn disarm(self) {
        std::mem::forget(self);
    }
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if *self.status == FormStatus::Submitting {
            warn!("signup request dropped before completing");
            *self.status = FormStatus::Failed;
            *self.error = Some(FALLBACK_ERROR.to_string());
        }
    }
}

/// Maps errors to user-facing strings without leaking transport details.
fn format_error(err: &AppError) -> String {
    err.server_message()
        .map_or_else(|| FALLBACK_ERROR.to_string(), str::to_string)
}
