//! Domain building blocks shared by the database and HTTP layers.

pub mod error;
pub mod item;
pub mod serde_helpers;
pub mod types;
