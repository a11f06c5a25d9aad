//! API Handlers
//!
//! HTTP request handlers for the phone and user endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};
use validator::Validate;

use super::state::AppState;
use crate::error::{ApiError, FieldError, Result};
use crate::models::requests::violations;
use crate::models::{
    CreatePhoneRequest, CreateUserRequest, HealthResponse, ListQuery, Phone, Resource,
    StatsResponse, User,
};
use crate::pagination::PageRequest;
use crate::representation;

/// Wraps an already serialized JSON body.
fn json_body(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Handler for GET /api/phones
pub async fn list_phones(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let request = PageRequest::from_query(&query, &state.page_defaults)?;
    let body = state.phones.view.list(request).await?;
    Ok(json_body(StatusCode::OK, body))
}

/// Handler for GET /api/phones/:id
pub async fn phone_detail(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Response> {
    let body = state.phones.view.detail(id).await?;
    Ok(json_body(StatusCode::OK, body))
}

/// Handler for POST /api/phones
pub async fn create_phone(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreatePhoneRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(req) = payload?;
    if let Err(errors) = req.validate() {
        let violations = violations(&errors);
        warn!(?violations, "phone payload rejected");
        return Err(ApiError::ValidationFailed(violations));
    }

    let phone = Phone {
        id: 0,
        name: req.name,
        brand: req.brand,
        color: req.color,
        price: req.price,
        description: req.description,
    };
    let repository = state.phones.repository.clone();
    let stored = state
        .invalidator
        .around(Phone::KIND, async move {
            repository.insert(phone).await.map_err(ApiError::from)
        })
        .await?;
    info!(id = stored.id, "phone created");

    created(&state, &stored)
}

/// Handler for DELETE /api/phones/:id
pub async fn delete_phone(State(state): State<AppState>, Path(id): Path<u64>) -> Result<StatusCode> {
    if state.phones.repository.find(id).await?.is_none() {
        return Err(ApiError::NotFound(format!("phone {id} not found")));
    }

    let repository = state.phones.repository.clone();
    let removed = state
        .invalidator
        .around(Phone::KIND, async move {
            repository.remove(id).await.map_err(ApiError::from)
        })
        .await?;
    if !removed {
        return Err(ApiError::NotFound(format!("phone {id} not found")));
    }
    info!(id, "phone deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let request = PageRequest::from_query(&query, &state.page_defaults)?;
    let body = state.users.view.list(request).await?;
    Ok(json_body(StatusCode::OK, body))
}

/// Handler for GET /api/users/:id
pub async fn user_detail(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Response> {
    let body = state.users.view.detail(id).await?;
    Ok(json_body(StatusCode::OK, body))
}

/// Handler for POST /api/users
///
/// `client_id` is optional; when given it must name an existing client.
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(req) = payload?;
    let mut problems = match req.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => violations(&errors),
    };
    let client = match req.client_id {
        Some(id) => {
            let client = state.clients.find(id);
            if client.is_none() {
                problems.push(FieldError::new("client_id", "Unknown client"));
            }
            client
        }
        None => None,
    };
    if !problems.is_empty() {
        warn!(violations = ?problems, "user payload rejected");
        return Err(ApiError::ValidationFailed(problems));
    }

    let user = User {
        id: 0,
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        client,
    };
    let repository = state.users.repository.clone();
    let stored = state
        .invalidator
        .around(User::KIND, async move {
            repository.insert(user).await.map_err(ApiError::from)
        })
        .await?;
    info!(id = stored.id, "user created");

    created(&state, &stored)
}

/// Handler for DELETE /api/users/:id
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<u64>) -> Result<StatusCode> {
    if state.users.repository.find(id).await?.is_none() {
        return Err(ApiError::NotFound(format!("user {id} not found")));
    }

    let repository = state.users.repository.clone();
    let removed = state
        .invalidator
        .around(User::KIND, async move {
            repository.remove(id).await.map_err(ApiError::from)
        })
        .await?;
    if !removed {
        return Err(ApiError::NotFound(format!("user {id} not found")));
    }
    info!(id, "user deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// 201 response with the stored record and a `Location` header.
fn created<T: Resource>(state: &AppState, record: &T) -> Result<Response> {
    let location = state
        .urls
        .url_for(T::KIND.detail_route(), &[("id", record.id().to_string())])?;
    let body = representation::detail(record)?;
    Ok((
        StatusCode::CREATED,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::LOCATION, location),
        ],
        body,
    )
        .into_response())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
