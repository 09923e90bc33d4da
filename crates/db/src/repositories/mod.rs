//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept any PostgreSQL executor as the first argument: `&PgPool` for
//! one-off statements, or the connection of a request's [`DbSession`]
//! when several statements must share a transaction.
//!
//! [`DbSession`]: crate::DbSession

pub mod item_repo;

pub use item_repo::ItemRepo;
