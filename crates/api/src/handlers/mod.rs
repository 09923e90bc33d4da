//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input through extractors, call exactly one service
//! function and shape the response; errors map via [`AppError`](crate::error::AppError).

pub mod health;
pub mod items;
