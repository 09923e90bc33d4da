//! `deserialize_with` helpers that normalize text fields while a request body
//! is being parsed, so declarative validation always sees the cleaned value.

use serde::{Deserialize, Deserializer};

/// Trim surrounding whitespace from a required string.
pub fn trim<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Trim an optional string. `null` stays `None`; a blank string stays `Some("")`
/// so length rules can reject it.
pub fn trim_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|s| s.trim().to_string()))
}

/// Trim an optional string and collapse blank values to `None`.
pub fn trim_blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(non_blank))
}

/// Patch semantics for a nullable text column.
///
/// Must be paired with `#[serde(default)]`: an absent field yields `None`
/// (leave untouched), `null` or a blank string yields `Some(None)` (clear), and
/// anything else yields `Some(Some(trimmed))`.
pub fn patch_blank_as_none<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(Some(value.and_then(non_blank)))
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
