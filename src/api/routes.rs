//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_phone, create_user, delete_phone, delete_user, health_handler, list_phones,
    list_users, phone_detail, stats_handler, user_detail,
};
use super::state::AppState;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/phones", get(list_phones).post(create_phone))
        .route("/api/phones/:id", get(phone_detail).delete(delete_phone))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/:id", get(user_detail).delete(delete_user))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
