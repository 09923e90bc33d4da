//! Repository for the `items` table.

use sqlx::PgExecutor;
use starter_core::types::DbId;

use crate::models::item::{CreateItem, Item};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, price, is_available, metadata, created_at, updated_at";

/// Name of the unique constraint on `items.name`.
pub const NAME_UNIQUE_CONSTRAINT: &str = "uq_items_name";

/// Provides CRUD operations for items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateItem) -> Result<Item, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO items (name, description, price, is_available, metadata)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.is_available)
            .bind(&input.metadata)
            .fetch_one(executor)
            .await
    }

    /// Find an item by its ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Item>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find an item by ID and lock the row until the surrounding transaction ends.
    pub async fn find_by_id_for_update<'e, E>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Item>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List items newest first, optionally only available ones.
    pub async fn list<'e, E>(
        executor: E,
        skip: i64,
        limit: i64,
        available_only: bool,
    ) -> Result<Vec<Item>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM items
             WHERE ($1 = false OR is_available)
             ORDER BY created_at DESC, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(available_only)
            .bind(limit)
            .bind(skip)
            .fetch_all(executor)
            .await
    }

    /// Write every mutable column of `item` back to its row.
    ///
    /// `updated_at` is refreshed by the `trg_items_updated_at` trigger.
    /// Returns `None` if the row no longer exists.
    pub async fn update<'e, E>(executor: E, item: &Item) -> Result<Option<Item>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE items SET
                name = $2,
                description = $3,
                price = $4,
                is_available = $5,
                metadata = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price)
            .bind(item.is_available)
            .bind(&item.metadata)
            .fetch_optional(executor)
            .await
    }

    /// Delete an item by ID. Returns `true` if a row was removed.
    pub async fn delete<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count items, optionally only available ones.
    pub async fn count<'e, E>(executor: E, available_only: bool) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE ($1 = false OR is_available)")
            .bind(available_only)
            .fetch_one(executor)
            .await
    }
}
