//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /api/phones`, `GET /api/users` - Cached, paginated list views
//! - `GET /api/phones/:id`, `GET /api/users/:id` - Single record
//! - `POST /api/phones`, `POST /api/users` - Create (invalidates list cache)
//! - `DELETE /api/phones/:id`, `DELETE /api/users/:id` - Delete (invalidates list cache)
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;
pub mod state;

pub use handlers::*;
pub use routes::create_router;
pub use state::{AppState, Collection};
