//! Store create/edit form.

use serde::Deserialize;

use super::{FormErrors, required_length};
use crate::db::stores::StoreFields;
use crate::models::Store;

/// Minimum length of a store title or address.
pub const MIN_LENGTH: usize = 3;
/// Maximum length of a store title or address.
pub const MAX_LENGTH: usize = 80;

/// Store form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreForm {
    pub title: String,
    pub address: String,
}

impl StoreForm {
    /// Pre-populate the form from an existing store.
    #[must_use]
    pub fn from_store(store: &Store) -> Self {
        Self {
            title: store.title.clone(),
            address: store.address.clone(),
        }
    }

    /// Validate the submitted values.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages if any field is missing or out of bounds.
    pub fn validate(&self) -> Result<StoreFields, FormErrors> {
        let mut errors = FormErrors::new();
        let title = required_length(&mut errors, "title", &self.title, MIN_LENGTH, MAX_LENGTH);
        let address =
            required_length(&mut errors, "address", &self.address, MIN_LENGTH, MAX_LENGTH);

        match (title, address) {
            (Some(title), Some(address)) if errors.is_empty() => Ok(StoreFields { title, address }),
            _ => Err(errors),
        }
    }
}
