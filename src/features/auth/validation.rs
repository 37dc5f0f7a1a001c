//! Sign-up form schema. `validate` is pure: it never touches the network and
//! reports every failing rule per field so the form can render each message
//! next to its input.

use super::types::{Goals, SignupPayload};
use regex::Regex;
use secrecy::SecretString;
use std::{collections::BTreeMap, fmt};

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Accepted stage range and the value used when the field is untouched.
pub const MIN_STAGE: u8 = 1;
pub const MAX_STAGE: u8 = 3;
pub const DEFAULT_STAGE: u8 = 1;

pub const EMAIL_INVALID: &str = "Enter a valid email";
pub const PASSWORD_TOO_SHORT: &str = "Password must contain at least 8 characters";
pub const PASSWORD_NEEDS_UPPERCASE: &str = "Include at least one uppercase letter";
pub const PASSWORD_NEEDS_LOWERCASE: &str = "Include at least one lowercase letter";
pub const PASSWORD_NEEDS_DIGIT: &str = "Include at least one number";
pub const STAGE_NOT_A_NUMBER: &str = "Stage must be a number";
pub const STAGE_OUT_OF_RANGE: &str = "Stage must be between 1 and 3";
pub const CONSENT_REQUIRED: &str = "Consent is required";

/// Character-class rules applied after the length check, in display order.
const PASSWORD_RULES: [(&str, &str); 3] = [
    (r"[A-Z]", PASSWORD_NEEDS_UPPERCASE),
    (r"[a-z]", PASSWORD_NEEDS_LOWERCASE),
    (r"[0-9]", PASSWORD_NEEDS_DIGIT),
];

/// Form inputs that can carry validation messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Password,
    Goals,
    Stage,
    Consent,
}

/// Validation messages keyed by field, in rule order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, Vec<&'static str>>);

impl FieldErrors {
    pub fn push(&mut self, field: Field, message: &'static str) {
        self.0.entry(field).or_default().push(message);
    }

    /// Every message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &[&'static str] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// The message shown next to the input.
    #[must_use]
    pub fn first(&self, field: Field) -> Option<&'static str> {
        self.get(field).first().copied()
    }

    #[must_use]
    pub fn contains(&self, field: Field, message: &str) -> bool {
        self.get(field).iter().any(|recorded| *recorded == message)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }
}

/// Raw form state, as typed by the user.
#[derive(Clone, Default)]
pub struct SignupFormValues {
    pub email: String,
    pub password: String,
    pub goals: Option<String>,
    /// Raw select value; `None` while the user has not touched it.
    pub stage: Option<String>,
    pub consent: bool,
}

impl fmt::Debug for SignupFormValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupFormValues")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("goals", &self.goals)
            .field("stage", &self.stage)
            .field("consent", &self.consent)
            .finish()
    }
}

/// Form values that passed validation.
#[derive(Debug)]
pub struct SignupInput {
    pub email: String,
    pub password: SecretString,
    pub goals: Option<String>,
    pub stage: u8,
    pub consent: bool,
}

impl SignupInput {
    /// Maps validated input to the request body; goals become `{summary}`.
    #[must_use]
    pub fn into_payload(self) -> SignupPayload {
        SignupPayload {
            email: self.email,
            password: self.password,
            goals: self.goals.map(|summary| Goals { summary }),
            stage: self.stage,
        }
    }
}

/// Validates raw form values.
///
/// # Errors
/// Returns every failing rule, grouped by field.
pub fn validate(values: &SignupFormValues) -> Result<SignupInput, FieldErrors> {
    let mut errors = FieldErrors::default();

    let email = values.email.trim();
    if !valid_email(email) {
        errors.push(Field::Email, EMAIL_INVALID);
    }

    for message in password_violations(&values.password) {
        errors.push(Field::Password, message);
    }

    let stage = match coerce_stage(values.stage.as_deref()) {
        Ok(stage) => stage,
        Err(message) => {
            errors.push(Field::Stage, message);
            DEFAULT_STAGE
        }
    };

    if !values.consent {
        errors.push(Field::Consent, CONSENT_REQUIRED);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SignupInput {
        email: email.to_string(),
        password: SecretString::from(values.password.clone()),
        goals: normalize_goals(values.goals.as_deref()),
        stage,
        consent: values.consent,
    })
}

/// Email syntax check: dotted local part without leading, trailing or
/// doubled dots, and a domain ending in an alphabetic TLD.
fn valid_email(email: &str) -> bool {
    if email.split('@').next().is_some_and(|local| local.contains("..")) {
        return false;
    }
    Regex::new(
        r"^[A-Za-z0-9_+\-](?:[A-Za-z0-9_+\-.]*[A-Za-z0-9_+\-])?@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
    )
    .is_ok_and(|regex| regex.is_match(email))
}

/// All password policy messages that apply, length first.
fn password_violations(password: &str) -> Vec<&'static str> {
    let mut violations = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        violations.push(PASSWORD_TOO_SHORT);
    }

    for (pattern, message) in PASSWORD_RULES {
        if !Regex::new(pattern).is_ok_and(|regex| regex.is_match(password)) {
            violations.push(message);
        }
    }

    violations
}

/// Untouched or blank selections default; anything else must be an integer in range.
fn coerce_stage(raw: Option<&str>) -> Result<u8, &'static str> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(DEFAULT_STAGE);
    };

    let stage = raw.parse::<i64>().map_err(|_| STAGE_NOT_A_NUMBER)?;

    u8::try_from(stage)
        .ok()
        .filter(|stage| (MIN_STAGE..=MAX_STAGE).contains(stage))
        .ok_or(STAGE_OUT_OF_RANGE)
}

/// Blank goals are dropped; anything else is kept exactly as typed.
fn normalize_goals(raw: Option<&str>) -> Option<String> {
    raw.filter(|goals| !goals.trim().is_empty())
        .map(str::to_string)
}
