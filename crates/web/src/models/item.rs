//! Grocery item domain type.

use chrono::{DateTime, Utc};

use grocery_core::{ItemCategory, ItemId, Price, StoreId, UserId, Username};

/// A product sold at exactly one store.
#[derive(Debug, Clone)]
pub struct Item {
    /// Unique item ID.
    pub id: ItemId,
    /// Item name, 3-30 characters.
    pub name: String,
    /// Non-negative price.
    pub price: Price,
    /// Fixed category.
    pub category: ItemCategory,
    /// Link to a photo of the item.
    pub photo_url: String,
    /// Store that sells the item.
    pub store_id: StoreId,
    /// Title of the store that sells the item.
    pub store_title: String,
    /// User who created the item.
    pub created_by: UserId,
    /// Username of the creator.
    pub created_by_username: Username,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}
