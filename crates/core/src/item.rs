//! Field rules for the item resource.
//!
//! Length limits are enforced declaratively on the request DTOs; the
//! functions here cover the rules `validator` has no built-in for.

use std::borrow::Cow;

use serde_json::Value;
use validator::ValidationError;

/// Maximum length of an item name, in characters.
pub const NAME_MAX_LEN: u64 = 100;

/// Maximum length of an item description, in characters.
pub const DESCRIPTION_MAX_LEN: u64 = 500;

/// Default and maximum page size for item listings.
pub const LIST_LIMIT_MAX: i64 = 100;

/// Item metadata must be a JSON object (possibly empty).
pub fn validate_metadata(metadata: &Value) -> Result<(), ValidationError> {
    if metadata.is_object() {
        Ok(())
    } else {
        let mut err = ValidationError::new("metadata_not_object");
        err.message = Some(Cow::from("metadata must be a JSON object"));
        Err(err)
    }
}

/// Default metadata value for new items.
pub fn empty_metadata() -> Value {
    Value::Object(serde_json::Map::new())
}
