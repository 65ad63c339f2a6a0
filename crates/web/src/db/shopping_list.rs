//! Shopping list repository.
//!
//! Each add inserts a new row, so the same item can appear several times in
//! one user's list. Rows are returned in the order they were added.

use sqlx::PgPool;
use tracing::{debug, instrument};

use grocery_core::{ItemId, ShoppingListEntryId, UserId};

use super::RepositoryError;
use super::items::{ITEM_COLUMNS, ItemRow};
use crate::models::Item;

/// Repository for shopping list operations.
pub struct ShoppingListRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShoppingListRepository<'a> {
    /// Create a new shopping list repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append an item to a user's shopping list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user or item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self))]
    pub async fn add(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<ShoppingListEntryId, RepositoryError> {
        let (id,): (ShoppingListEntryId,) = sqlx::query_as(
            r"
            INSERT INTO grocery.shopping_list_item (user_id, item_id)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(item_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        debug!(%id, "Added item to shopping list");
        Ok(id)
    }

    /// List the items on a user's shopping list in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Item>, RepositoryError> {
        let sql = format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM grocery.shopping_list_item sli
            JOIN grocery.item i ON i.id = sli.item_id
            JOIN grocery.store s ON s.id = i.store_id
            JOIN grocery."user" u ON u.id = i.created_by
            WHERE sli.user_id = $1
            ORDER BY sli.id
            "#
        );
        let rows = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }
}
