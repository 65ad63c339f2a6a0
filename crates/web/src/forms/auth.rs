//! Signup and login forms.

use serde::Deserialize;

use grocery_core::{Username, UsernameError};

use super::{FormErrors, REQUIRED, length_message, required};

/// Message shown when a signup picks a registered username.
pub const USERNAME_TAKEN: &str = "That username is taken. Please choose a different one.";

/// Signup form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
}

/// Validated signup input.
#[derive(Debug)]
pub struct SignupInput {
    pub username: Username,
    pub password: String,
}

impl SignupForm {
    /// Validate the submitted values.
    ///
    /// Username availability needs the database and is checked by the caller.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages if a field is missing or the username
    /// is out of bounds.
    pub fn validate(&self) -> Result<SignupInput, FormErrors> {
        let mut errors = FormErrors::new();

        let username = required(&mut errors, "username", &self.username).and_then(|raw| {
            Username::parse(raw)
                .map_err(|e| errors.add("username", username_message(&e)))
                .ok()
        });

        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }

        match username {
            Some(username) if errors.is_empty() => Ok(SignupInput {
                username,
                password: self.password.clone(),
            }),
            _ => Err(errors),
        }
    }

    /// The form to re-render after a failed submission. The password is never echoed.
    #[must_use]
    pub fn redisplay(&self) -> Self {
        Self {
            username: self.username.clone(),
            password: String::new(),
        }
    }
}

/// Login form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// Check that both fields were filled in.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages if a field is missing.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        required(&mut errors, "username", &self.username);
        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The form to re-render after a failed submission. The password is never echoed.
    #[must_use]
    pub fn redisplay(&self) -> Self {
        Self {
            username: self.username.clone(),
            password: String::new(),
        }
    }
}

fn username_message(err: &UsernameError) -> String {
    match err {
        UsernameError::Empty => REQUIRED.to_owned(),
        UsernameError::TooShort { .. } | UsernameError::TooLong { .. } => {
            length_message(Username::MIN_LENGTH, Username::MAX_LENGTH)
        }
    }
}
