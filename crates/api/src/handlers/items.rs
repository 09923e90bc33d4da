//! Handlers for the `/items` resource.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use starter_db::models::item::{CreateItem, Item, ItemCountQuery, ItemListQuery, UpdateItem};
use starter_db::DbSession;

use crate::error::{AppResult, ErrorBody};
use crate::middleware::validation::{ValidatedJson, ValidatedQuery};
use crate::response::CountResponse;
use crate::services::ItemService;

/// POST /api/v1/items
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 409, description = "Name already taken", body = ErrorBody),
        (status = 422, description = "Invalid request", body = ErrorBody),
    )
)]
pub async fn create(
    mut session: DbSession,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let item = ItemService::create(&mut session, &input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/items
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(ItemListQuery),
    responses(
        (status = 200, description = "Items, newest first", body = Vec<Item>),
        (status = 422, description = "Invalid query parameters", body = ErrorBody),
    )
)]
pub async fn list(
    mut session: DbSession,
    ValidatedQuery(query): ValidatedQuery<ItemListQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let items = ItemService::list(&mut session, &query).await?;
    Ok(Json(items))
}

/// GET /api/v1/items/stats/count
#[utoipa::path(
    get,
    path = "/items/stats/count",
    tag = "items",
    params(ItemCountQuery),
    responses(
        (status = 200, description = "Number of items", body = CountResponse),
        (status = 422, description = "Invalid query parameters", body = ErrorBody),
    )
)]
pub async fn count(
    mut session: DbSession,
    ValidatedQuery(query): ValidatedQuery<ItemCountQuery>,
) -> AppResult<Json<CountResponse>> {
    let count = ItemService::count(&mut session, query.available_only).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/v1/items/{item_id}
#[utoipa::path(
    get,
    path = "/items/{item_id}",
    tag = "items",
    params(("item_id" = String, Path, description = "Item UUID")),
    responses(
        (status = 200, description = "The item", body = Item),
        (status = 404, description = "No such item", body = ErrorBody),
    )
)]
pub async fn get_by_id(
    mut session: DbSession,
    Path(item_id): Path<String>,
) -> AppResult<Json<Item>> {
    let item = ItemService::get(&mut session, &item_id).await?;
    Ok(Json(item))
}

/// PATCH /api/v1/items/{item_id}
#[utoipa::path(
    patch,
    path = "/items/{item_id}",
    tag = "items",
    params(("item_id" = String, Path, description = "Item UUID")),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "The updated item", body = Item),
        (status = 404, description = "No such item", body = ErrorBody),
        (status = 409, description = "Name already taken", body = ErrorBody),
        (status = 422, description = "Invalid request", body = ErrorBody),
    )
)]
pub async fn update(
    mut session: DbSession,
    Path(item_id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> AppResult<Json<Item>> {
    let item = ItemService::update(&mut session, &item_id, &input).await?;
    Ok(Json(item))
}

/// DELETE /api/v1/items/{item_id}
#[utoipa::path(
    delete,
    path = "/items/{item_id}",
    tag = "items",
    params(("item_id" = String, Path, description = "Item UUID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "No such item", body = ErrorBody),
    )
)]
pub async fn delete(mut session: DbSession, Path(item_id): Path<String>) -> AppResult<StatusCode> {
    ItemService::delete(&mut session, &item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
