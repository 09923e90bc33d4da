//! Item entity model and DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use starter_core::item::{
    empty_metadata, validate_metadata, DESCRIPTION_MAX_LEN, LIST_LIMIT_MAX, NAME_MAX_LEN,
};
use starter_core::serde_helpers::{patch_blank_as_none, trim, trim_blank_as_none, trim_option};
use starter_core::types::{DbId, Timestamp};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// An item row from the `items` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Item {
    #[schema(value_type = String, format = Uuid)]
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub is_available: bool,
    #[schema(value_type = Object)]
    pub metadata: Value,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

/// DTO for creating a new item.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[serde(deserialize_with = "trim")]
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    #[schema(min_length = 1, max_length = 100, example = "Widget")]
    pub name: String,
    /// Blank descriptions are stored as `null`.
    #[serde(default, deserialize_with = "trim_blank_as_none")]
    #[validate(length(max = DESCRIPTION_MAX_LEN))]
    #[schema(max_length = 500)]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    #[schema(exclusive_minimum = 0.0, example = 9.99)]
    pub price: f64,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default = "empty_metadata")]
    #[validate(custom(function = validate_metadata))]
    #[schema(value_type = Object)]
    pub metadata: Value,
}

fn default_available() -> bool {
    true
}

/// DTO for patching an item. Absent fields are left untouched.
///
/// `description: null` clears the description; `null` on any other field is
/// treated the same as leaving it out.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[serde(default, deserialize_with = "trim_option")]
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    #[schema(min_length = 1, max_length = 100)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "patch_blank_as_none")]
    #[validate(length(max = DESCRIPTION_MAX_LEN))]
    #[schema(value_type = Option<String>, max_length = 500)]
    pub description: Option<Option<String>>,
    #[validate(range(exclusive_min = 0.0))]
    #[schema(exclusive_minimum = 0.0)]
    pub price: Option<f64>,
    pub is_available: Option<bool>,
    #[validate(custom(function = validate_metadata))]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
}

impl UpdateItem {
    /// Names of the fields this patch will change, in declaration order.
    pub fn updated_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.price.is_some() {
            fields.push("price");
        }
        if self.is_available.is_some() {
            fields.push("is_available");
        }
        if self.metadata.is_some() {
            fields.push("metadata");
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.updated_fields().is_empty()
    }

    /// Overwrite the provided fields on `item`.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            item.description.clone_from(description);
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(is_available) = self.is_available {
            item.is_available = is_available;
        }
        if let Some(metadata) = &self.metadata {
            item.metadata.clone_from(metadata);
        }
    }
}

/// Query parameters for `GET /items`.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemListQuery {
    /// Number of items to skip.
    #[serde(default)]
    #[validate(range(min = 0))]
    #[param(minimum = 0, default = 0)]
    pub skip: i64,
    /// Maximum number of items to return.
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = LIST_LIMIT_MAX))]
    #[param(minimum = 1, maximum = 100, default = 100)]
    pub limit: i64,
    /// Only return items that are currently available.
    #[serde(default)]
    pub available_only: bool,
}

impl Default for ItemListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
            available_only: false,
        }
    }
}

fn default_limit() -> i64 {
    LIST_LIMIT_MAX
}

/// Query parameters for `GET /items/stats/count`.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemCountQuery {
    /// Only count items that are currently available.
    #[serde(default)]
    pub available_only: bool,
}
