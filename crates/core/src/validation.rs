//! Sign-in and registration form validation.
//!
//! Every failing field is reported at once so the form can show all messages inline.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern should compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldError {
    #[error("is required")]
    Required,

    #[error("has an invalid format")]
    InvalidFormat,

    #[error("must be at least {min} characters")]
    TooShort { min: usize },

    #[error("does not match")]
    Mismatch,
}

impl FieldError {
    /// Message for rendering next to `field`.
    #[must_use]
    pub fn message(self, field: Field) -> &'static str {
        match (field, self) {
            (Field::Name, _) => "Name is required",
            (Field::Email, FieldError::Required) => "Email is required",
            (Field::Email, _) => "Invalid email format",
            (Field::Password, FieldError::Required) => "Password is required",
            (Field::Password, _) => "Password must be at least 6 characters",
            (Field::ConfirmPassword, _) => "Passwords do not match",
        }
    }
}

/// All field failures of one submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<(Field, FieldError)>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, error: FieldError) {
        self.errors.push((field, error));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors
            .iter()
            .find_map(|(f, e)| (*f == field).then_some(*e))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().copied()
    }

    /// Drops the error for `field`, as when the learner edits it.
    pub fn clear(&mut self, field: Field) {
        self.errors.retain(|(f, _)| *f != field);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{} {error}", field.key())?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Credentials {
    #[must_use]
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn register(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// The entered name, or the email's local part when no name was given.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = self.name.trim();
        if !name.is_empty() {
            return name.to_owned();
        }
        self.email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_owned()
    }

    /// Checks the form for `mode`.
    ///
    /// # Errors
    ///
    /// Returns every failing field as `ValidationErrors`.
    pub fn validate(&self, mode: AuthMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if mode == AuthMode::Register && self.name.trim().is_empty() {
            errors.push(Field::Name, FieldError::Required);
        }

        if self.email.is_empty() {
            errors.push(Field::Email, FieldError::Required);
        } else if !is_plausible_email(&self.email) {
            errors.push(Field::Email, FieldError::InvalidFormat);
        }

        if self.password.is_empty() {
            errors.push(Field::Password, FieldError::Required);
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(
                Field::Password,
                FieldError::TooShort {
                    min: MIN_PASSWORD_LEN,
                },
            );
        }

        if mode == AuthMode::Register && self.password != self.confirm_password {
            errors.push(Field::ConfirmPassword, FieldError::Mismatch);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Permissive `something@something.something` check.
#[must_use]
pub fn is_plausible_email(raw: &str) -> bool {
    EMAIL_PATTERN.is_match(raw)
}
