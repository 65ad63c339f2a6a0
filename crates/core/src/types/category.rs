//! Grocery item categories.

use serde::{Deserialize, Serialize};

/// Error returned when a category string is not one of the fixed choices.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    /// The value is not a known category.
    #[error("unknown item category: {0}")]
    Unknown(String),
}

/// The aisle an item belongs to.
///
/// Stored as the `grocery.item_category` enum and submitted by forms in its
/// upper-case form (`PRODUCE`, `DELI`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "grocery.item_category", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    Produce,
    Deli,
    Bakery,
    Pantry,
    Frozen,
    #[default]
    Other,
}

impl ItemCategory {
    /// Every category, in the order forms list them.
    pub const ALL: [Self; 6] = [
        Self::Produce,
        Self::Deli,
        Self::Bakery,
        Self::Pantry,
        Self::Frozen,
        Self::Other,
    ];

    /// The persisted and submitted form of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Produce => "PRODUCE",
            Self::Deli => "DELI",
            Self::Bakery => "BAKERY",
            Self::Pantry => "PANTRY",
            Self::Frozen => "FROZEN",
            Self::Other => "OTHER",
        }
    }

    /// Human-readable label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Produce => "Produce",
            Self::Deli => "Deli",
            Self::Bakery => "Bakery",
            Self::Pantry => "Pantry",
            Self::Frozen => "Frozen",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemCategory {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CategoryError::Unknown(s.to_owned()))
    }
}
