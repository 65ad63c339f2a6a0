//! Item repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use grocery_core::{ItemCategory, ItemId, Price, StoreId, UserId, Username};

use super::RepositoryError;
use crate::models::Item;

/// Columns selected for every item query. Expects aliases `i` (item),
/// `s` (store) and `u` (creator).
pub(crate) const ITEM_COLUMNS: &str = r#"
    i.id, i.name, i.price, i.category, i.photo_url, i.store_id,
    s.title AS store_title, i.created_by,
    u.username AS created_by_username, i.created_at
"#;

/// Editable item fields, already validated.
#[derive(Debug, Clone)]
pub struct ItemFields {
    /// Item name.
    pub name: String,
    /// Item price.
    pub price: Price,
    /// Item category.
    pub category: ItemCategory,
    /// Photo link.
    pub photo_url: String,
    /// Store selling the item.
    pub store_id: StoreId,
}

#[derive(sqlx::FromRow)]
pub(crate) struct ItemRow {
    id: ItemId,
    name: String,
    price: Price,
    category: ItemCategory,
    photo_url: String,
    store_id: StoreId,
    store_title: String,
    created_by: UserId,
    created_by_username: Username,
    created_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            category: row.category,
            photo_url: row.photo_url,
            store_id: row.store_id,
            store_title: row.store_title,
            created_by: row.created_by,
            created_by_username: row.created_by_username,
            created_at: row.created_at,
        }
    }
}

/// Repository for item database operations.
pub struct ItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ItemId) -> Result<Option<Item>, RepositoryError> {
        let sql = format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM grocery.item i
            JOIN grocery.store s ON s.id = i.store_id
            JOIN grocery."user" u ON u.id = i.created_by
            WHERE i.id = $1
            "#
        );
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Item::from))
    }

    /// List the items sold at a store, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_store(&self, store_id: StoreId) -> Result<Vec<Item>, RepositoryError> {
        let sql = format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM grocery.item i
            JOIN grocery.store s ON s.id = i.store_id
            JOIN grocery."user" u ON u.id = i.created_by
            WHERE i.store_id = $1
            ORDER BY i.id
            "#
        );
        let rows = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(store_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Create an item owned by `created_by`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, input), fields(name = %input.name, store_id = %input.store_id))]
    pub async fn create(
        &self,
        input: &ItemFields,
        created_by: UserId,
    ) -> Result<Item, RepositoryError> {
        let (id,): (ItemId,) = sqlx::query_as(
            r"
            INSERT INTO grocery.item (name, price, category, photo_url, store_id, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            ",
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(input.category)
        .bind(&input.photo_url)
        .bind(input.store_id)
        .bind(created_by)
        .fetch_one(self.pool)
        .await
        .map_err(missing_store)?;

        debug!(%id, "Created item");
        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Overwrite every editable field of an item. The creator is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item or the new store doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: ItemId, input: &ItemFields) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE grocery.item
            SET name = $1, price = $2, category = $3, photo_url = $4, store_id = $5
            WHERE id = $6
            ",
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(input.category)
        .bind(&input.photo_url)
        .bind(input.store_id)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(missing_store)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// A foreign-key violation here means the referenced store vanished.
fn missing_store(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::NotFound;
    }
    RepositoryError::Database(err)
}
