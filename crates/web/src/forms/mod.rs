//! Typed form payloads and their validation.
//!
//! Each form deserializes every field as a raw string (missing fields become
//! empty) so that an invalid submission can be re-rendered exactly as typed.
//! `validate` turns the raw form into the typed values the repositories take,
//! or into [`FormErrors`] keyed by field name.

pub mod auth;
pub mod item;
pub mod store;

pub use auth::{LoginForm, SignupForm};
pub use item::{ItemForm, StoreChoice};
pub use store::StoreForm;

/// Message for a missing or blank field.
pub const REQUIRED: &str = "This field is required.";

/// Message for a value outside a fixed set of choices.
pub const INVALID_CHOICE: &str = "Not a valid choice.";

/// Validation messages grouped by field, in the order they were recorded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors {
    fields: Vec<(&'static str, Vec<String>)>,
}

impl FormErrors {
    /// Create an empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        let message = message.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.fields.push((field, vec![message])),
        }
    }

    /// Messages recorded against a field (empty if none).
    #[must_use]
    pub fn for_field(&self, field: &str) -> &[String] {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map_or(&[], |(_, messages)| messages.as_slice())
    }

    /// Whether a field has any messages.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        !self.for_field(field).is_empty()
    }

    /// Whether no messages were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of the fields with messages, in recording order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }
}

/// Trim a text field and require it to be non-empty.
///
/// Returns `None` (after recording the error) when the field is blank.
pub(crate) fn required<'a>(
    errors: &mut FormErrors,
    field: &'static str,
    value: &'a str,
) -> Option<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, REQUIRED);
        None
    } else {
        Some(trimmed)
    }
}

/// Require a trimmed text field whose length (in characters) is within `min..=max`.
pub(crate) fn required_length(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Option<String> {
    let value = required(errors, field, value)?;
    let len = value.chars().count();
    if len < min || len > max {
        errors.add(field, length_message(min, max));
        return None;
    }
    Some(value.to_owned())
}

/// Message for a text field outside its length bounds.
#[must_use]
pub fn length_message(min: usize, max: usize) -> String {
    format!("Field must be between {min} and {max} characters long.")
}
