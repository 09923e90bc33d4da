//! Business logic for items.

use starter_core::error::CoreError;
use starter_core::types::DbId;
use starter_db::models::item::{CreateItem, Item, ItemListQuery, UpdateItem};
use starter_db::repositories::item_repo::NAME_UNIQUE_CONSTRAINT;
use starter_db::repositories::ItemRepo;
use starter_db::DbSession;

use crate::error::{AppError, AppResult};

const ENTITY: &str = "Item";

/// Item operations. Each call runs in the caller's session and commits its
/// own work; on error the session is left uncommitted and rolls back on drop.
pub struct ItemService;

impl ItemService {
    pub async fn create(session: &mut DbSession, input: &CreateItem) -> AppResult<Item> {
        let item = ItemRepo::create(session.conn().await?, input)
            .await
            .map_err(|e| name_conflict(e, &input.name))?;
        session.commit().await?;

        tracing::info!(item_id = %item.id, item_name = %item.name, "Item created");
        Ok(item)
    }

    pub async fn get(session: &mut DbSession, item_id: &str) -> AppResult<Item> {
        let id = parse_id(item_id)?;
        let item = ItemRepo::find_by_id(session.conn().await?, id)
            .await?
            .ok_or_else(|| not_found(item_id))?;

        tracing::debug!(item_id = %id, "Item retrieved");
        Ok(item)
    }

    pub async fn list(session: &mut DbSession, query: &ItemListQuery) -> AppResult<Vec<Item>> {
        let items = ItemRepo::list(
            session.conn().await?,
            query.skip,
            query.limit,
            query.available_only,
        )
        .await?;

        tracing::debug!(
            returned_count = items.len(),
            skip = query.skip,
            limit = query.limit,
            available_only = query.available_only,
            "Items listed"
        );
        Ok(items)
    }

    /// Apply only the fields present in `input`. The row is locked for the
    /// duration of the read-modify-write.
    pub async fn update(
        session: &mut DbSession,
        item_id: &str,
        input: &UpdateItem,
    ) -> AppResult<Item> {
        let id = parse_id(item_id)?;
        let mut item = ItemRepo::find_by_id_for_update(session.conn().await?, id)
            .await?
            .ok_or_else(|| not_found(item_id))?;

        input.apply_to(&mut item);
        let item = ItemRepo::update(session.conn().await?, &item)
            .await
            .map_err(|e| name_conflict(e, &item.name))?
            .ok_or_else(|| not_found(item_id))?;
        session.commit().await?;

        tracing::info!(
            item_id = %item.id,
            updated_fields = ?input.updated_fields(),
            "Item updated"
        );
        Ok(item)
    }

    pub async fn delete(session: &mut DbSession, item_id: &str) -> AppResult<()> {
        let id = parse_id(item_id)?;
        if !ItemRepo::delete(session.conn().await?, id).await? {
            return Err(not_found(item_id));
        }
        session.commit().await?;

        tracing::info!(item_id = %id, "Item deleted");
        Ok(())
    }

    pub async fn count(session: &mut DbSession, available_only: bool) -> AppResult<i64> {
        let count = ItemRepo::count(session.conn().await?, available_only).await?;
        tracing::debug!(count, available_only, "Items counted");
        Ok(count)
    }
}

/// Identifiers that are not UUIDs cannot name an existing item.
fn parse_id(item_id: &str) -> AppResult<DbId> {
    DbId::parse_str(item_id).map_err(|_| {
        tracing::warn!(item_id, "Item not found");
        not_found(item_id)
    })
}

fn not_found(item_id: &str) -> AppError {
    AppError::Core(CoreError::not_found(ENTITY, item_id))
}

fn name_conflict(err: sqlx::Error, name: &str) -> AppError {
    if starter_db::is_unique_violation(&err, NAME_UNIQUE_CONSTRAINT) {
        AppError::Core(CoreError::Conflict(format!(
            "Item with name '{name}' already exists"
        )))
    } else {
        AppError::Database(err)
    }
}
