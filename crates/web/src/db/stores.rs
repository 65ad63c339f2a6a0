//! Store repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use grocery_core::{StoreId, UserId, Username};

use super::RepositoryError;
use crate::models::Store;

/// Editable store fields, already validated.
#[derive(Debug, Clone)]
pub struct StoreFields {
    /// Store title.
    pub title: String,
    /// Store address.
    pub address: String,
}

#[derive(sqlx::FromRow)]
struct StoreRow {
    id: StoreId,
    title: String,
    address: String,
    created_by: UserId,
    created_by_username: Username,
    created_at: DateTime<Utc>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            address: row.address,
            created_by: row.created_by,
            created_by_username: row.created_by_username,
            created_at: row.created_at,
        }
    }
}

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every store, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT s.id, s.title, s.address, s.created_by,
                   u.username AS created_by_username, s.created_at
            FROM grocery.store s
            JOIN grocery."user" u ON u.id = s.created_by
            ORDER BY s.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Store::from).collect())
    }

    /// Get a store by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT s.id, s.title, s.address, s.created_by,
                   u.username AS created_by_username, s.created_at
            FROM grocery.store s
            JOIN grocery."user" u ON u.id = s.created_by
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Store::from))
    }

    /// Create a store owned by `created_by`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(
        &self,
        input: &StoreFields,
        created_by: UserId,
    ) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            WITH inserted AS (
                INSERT INTO grocery.store (title, address, created_by)
                VALUES ($1, $2, $3)
                RETURNING id, title, address, created_by, created_at
            )
            SELECT i.id, i.title, i.address, i.created_by,
                   u.username AS created_by_username, i.created_at
            FROM inserted i
            JOIN grocery."user" u ON u.id = i.created_by
            "#,
        )
        .bind(&input.title)
        .bind(&input.address)
        .bind(created_by)
        .fetch_one(self.pool)
        .await?;

        debug!(id = %row.id, "Created store");
        Ok(Store::from(row))
    }

    /// Overwrite a store's title and address. The creator is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: StoreId, input: &StoreFields) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE grocery.store
            SET title = $1, address = $2
            WHERE id = $3
            ",
        )
        .bind(&input.title)
        .bind(&input.address)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
