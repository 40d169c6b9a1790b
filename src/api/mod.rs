//! API Module
//!
//! HTTP handlers and routing for the service's operational endpoints. Cache
//! data is not exposed over HTTP.
//!
//! # Endpoints
//! - `GET /` - Ping
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache statistics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
