//! Item create/edit form.

use serde::Deserialize;

use grocery_core::{ItemCategory, Price, PriceError, StoreId};

use super::{FormErrors, INVALID_CHOICE, REQUIRED, required, required_length};
use crate::db::items::ItemFields;
use crate::models::{Item, Store};

/// Minimum length of an item name.
pub const MIN_NAME_LENGTH: usize = 3;
/// Maximum length of an item name.
pub const MAX_NAME_LENGTH: usize = 30;

/// A store offered in the item form's store picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChoice {
    pub id: StoreId,
    pub title: String,
}

impl From<&Store> for StoreChoice {
    fn from(store: &Store) -> Self {
        Self {
            id: store.id,
            title: store.title.clone(),
        }
    }
}

/// Item form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItemForm {
    pub name: String,
    pub price: String,
    pub category: String,
    pub photo_url: String,
    /// Selected store ID, as submitted.
    #[serde(rename = "store")]
    pub store_id: String,
}

impl ItemForm {
    /// Pre-populate the form from an existing item.
    #[must_use]
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price.to_string(),
            category: item.category.as_str().to_owned(),
            photo_url: item.photo_url.clone(),
            store_id: item.store_id.to_string(),
        }
    }

    /// Whether `store` is the currently selected store.
    #[must_use]
    pub fn is_store_selected(&self, store: &StoreChoice) -> bool {
        self.store_id.trim() == store.id.to_string()
    }

    /// Whether `category` is the currently selected category.
    #[must_use]
    pub fn is_category_selected(&self, category: &ItemCategory) -> bool {
        self.category.trim() == category.as_str()
    }

    /// Validate the submitted values against the stores that can be picked.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages if any field is missing or invalid.
    pub fn validate(&self, stores: &[StoreChoice]) -> Result<ItemFields, FormErrors> {
        let mut errors = FormErrors::new();

        let name = required_length(
            &mut errors,
            "name",
            &self.name,
            MIN_NAME_LENGTH,
            MAX_NAME_LENGTH,
        );
        let price = parse_price(&mut errors, &self.price);
        let category = parse_category(&mut errors, &self.category);
        let photo_url = required(&mut errors, "photo_url", &self.photo_url).map(str::to_owned);
        let store_id = parse_store(&mut errors, &self.store_id, stores);

        match (name, price, category, photo_url, store_id) {
            (Some(name), Some(price), Some(category), Some(photo_url), Some(store_id))
                if errors.is_empty() =>
            {
                Ok(ItemFields {
                    name,
                    price,
                    category,
                    photo_url,
                    store_id,
                })
            }
            _ => Err(errors),
        }
    }
}

fn parse_price(errors: &mut FormErrors, raw: &str) -> Option<Price> {
    match Price::parse(raw) {
        Ok(price) => Some(price),
        Err(PriceError::Empty) => {
            errors.add("price", REQUIRED);
            None
        }
        Err(PriceError::NotANumber(_)) => {
            errors.add("price", "Not a valid float value.");
            None
        }
        Err(PriceError::Negative) => {
            errors.add("price", "Number must be at least 0.");
            None
        }
        Err(PriceError::TooLarge) => {
            errors.add("price", format!("Number must be at most {}.", Price::MAX));
            None
        }
    }
}

fn parse_category(errors: &mut FormErrors, raw: &str) -> Option<ItemCategory> {
    let raw = required(errors, "category", raw)?;
    raw.parse::<ItemCategory>()
        .map_err(|_| errors.add("category", INVALID_CHOICE))
        .ok()
}

fn parse_store(errors: &mut FormErrors, raw: &str, stores: &[StoreChoice]) -> Option<StoreId> {
    let chosen = raw
        .trim()
        .parse::<i32>()
        .ok()
        .map(StoreId::new)
        .filter(|id| stores.iter().any(|store| store.id == *id));

    if chosen.is_none() {
        errors.add("store", INVALID_CHOICE);
    }
    chosen
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn stores() -> Vec<StoreChoice> {
        vec![
            StoreChoice {
                id: StoreId::new(1),
                title: "Corner Shop".to_owned(),
            },
            StoreChoice {
                id: StoreId::new(2),
                title: "Farmers Market".to_owned(),
            },
        ]
    }

    fn milk(category: &str) -> ItemForm {
        ItemForm {
            name: "Milk".to_owned(),
            price: "3.5".to_owned(),
            category: category.to_owned(),
            photo_url: "https://example.com/milk.jpg".to_owned(),
            store_id: "1".to_owned(),
        }
    }

    #[test]
    fn test_valid_item() {
        let fields = milk("PANTRY").validate(&stores()).unwrap();
        assert_eq!(fields.name, "Milk");
        assert_eq!(fields.price.to_string(), "3.50");
        assert_eq!(fields.category, ItemCategory::Pantry);
        assert_eq!(fields.store_id, StoreId::new(1));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let errors = milk("DAIRY").validate(&stores()).unwrap_err();
        assert_eq!(errors.for_field("category"), [INVALID_CHOICE]);
        assert_eq!(errors.field_names().collect::<Vec<_>>(), ["category"]);
    }

    #[test]
    fn test_missing_category() {
        let errors = milk("").validate(&stores()).unwrap_err();
        assert_eq!(errors.for_field("category"), [REQUIRED]);
    }

    #[test]
    fn test_name_length() {
        let mut form = milk("PANTRY");
        form.name = "Mi".to_owned();
        let errors = form.validate(&stores()).unwrap_err();
        assert_eq!(
            errors.for_field("name"),
            ["Field must be between 3 and 30 characters long."]
        );

        form.name = "x".repeat(31);
        assert!(form.validate(&stores()).is_err());

        form.name = "x".repeat(30);
        assert!(form.validate(&stores()).is_ok());
    }

    #[test]
    fn test_price_errors() {
        let mut form = milk("PANTRY");

        form.price = String::new();
        assert_eq!(
            form.validate(&stores()).unwrap_err().for_field("price"),
            [REQUIRED]
        );

        form.price = "cheap".to_owned();
        assert_eq!(
            form.validate(&stores()).unwrap_err().for_field("price"),
            ["Not a valid float value."]
        );

        form.price = "-1".to_owned();
        assert_eq!(
            form.validate(&stores()).unwrap_err().for_field("price"),
            ["Number must be at least 0."]
        );

        form.price = "0".to_owned();
        assert!(form.validate(&stores()).is_ok());
    }

    #[test]
    fn test_price_must_fit_storage() {
        let mut form = milk("PANTRY");

        form.price = "12345678901".to_owned();
        assert_eq!(
            form.validate(&stores()).unwrap_err().for_field("price"),
            ["Number must be at most 99999999.99."]
        );

        form.price = "99999999.99".to_owned();
        assert_eq!(form.validate(&stores()).unwrap().price, Price::MAX);
    }

    #[test]
    fn test_unknown_store_is_rejected() {
        let mut form = milk("PANTRY");
        form.store_id = "99".to_owned();
        assert_eq!(
            form.validate(&stores()).unwrap_err().for_field("store"),
            [INVALID_CHOICE]
        );

        form.store_id = "corner".to_owned();
        assert!(form.validate(&stores()).unwrap_err().has("store"));
    }

    #[test]
    fn test_no_stores_means_no_valid_choice() {
        assert!(milk("PANTRY").validate(&[]).unwrap_err().has("store"));
    }

    #[test]
    fn test_photo_url_required() {
        let mut form = milk("PANTRY");
        form.photo_url = "  ".to_owned();
        assert_eq!(
            form.validate(&stores()).unwrap_err().for_field("photo_url"),
            [REQUIRED]
        );
    }

    #[test]
    fn test_selection_helpers() {
        let form = milk("FROZEN");
        let choices = stores();
        assert!(form.is_store_selected(&choices[0]));
        assert!(!form.is_store_selected(&choices[1]));
        assert!(form.is_category_selected(&ItemCategory::Frozen));
        assert!(!form.is_category_selected(&ItemCategory::Deli));
    }
}
