//! HTTP surface of the starter service: configuration, logging, routing,
//! request extractors, item handlers and the OpenAPI document.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
