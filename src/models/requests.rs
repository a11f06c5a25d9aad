//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming query strings and HTTP request bodies.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::error::FieldError;

/// Query string of the list endpoints (`?page=2&limit=10`).
///
/// Values are kept raw so that malformed numbers surface as
/// `InvalidParameter` instead of a framework rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Request body for `POST /api/users`.
///
/// Missing string fields deserialize as empty so they are reported as
/// validation violations rather than as malformed JSON.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "First name must be between 1 and 255 characters"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Last name must be between 1 and 255 characters"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,
    #[serde(default, rename = "client_id")]
    pub client_id: Option<u64>,
}

/// Request body for `POST /api/phones`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreatePhoneRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Brand must be between 1 and 255 characters"))]
    pub brand: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Color must be between 1 and 255 characters"))]
    pub color: String,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

/// Flattens validator output into wire-named field errors, sorted by field.
pub fn violations(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = wire_field_name(&field.to_string());
            errs.iter().map(move |err| {
                let message = match err.message {
                    Some(ref msg) => msg.to_string(),
                    None => format!("Invalid value ({})", err.code),
                };
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    out
}

fn wire_field_name(field: &str) -> String {
    match field {
        "first_name" => "firstName".to_string(),
        "last_name" => "lastName".to_string(),
        other => other.to_string(),
    }
}
