//! Service layer.
//!
//! Each service is a zero-sized struct whose async functions take the
//! request's [`DbSession`](starter_db::DbSession) plus validated input, run
//! their repository calls in one transaction and return domain results or
//! [`AppError`](crate::error::AppError).

pub mod item_service;

pub use item_service::ItemService;
