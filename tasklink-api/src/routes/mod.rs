/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Liveness endpoints
/// - `users`: User listing, creation and deletion
/// - `tasks`: Task listing, creation, update and deletion
/// - `user_tasks`: Assigning users to tasks
///
/// It also holds the pieces every handler shares: body parsing, the search
/// query string and the `{ message, user? }` response envelope.

pub mod health;
pub mod tasks;
pub mod user_tasks;
pub mod users;

use crate::error::{ApiError, ApiResult};
use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `?q=` search parameter accepted by the list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Response envelope for mutations
///
/// The record travels under `user` for every resource, tasks included, to
/// keep the payload shape existing clients read.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T> {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<T>,
}

impl MessageResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user: None,
        }
    }
}

impl<T> MessageResponse<T> {
    pub fn with_record(message: impl Into<String>, record: T) -> Self {
        Self {
            message: message.into(),
            user: Some(record),
        }
    }
}

/// Parses a request body into a JSON object
///
/// An empty body and any non-object JSON value both yield an empty object,
/// so missing fields are reported by the field checks rather than here.
///
/// # Errors
///
/// Returns `BadRequest` when the body is not valid JSON
pub fn parse_object(body: &Bytes) -> ApiResult<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Ok(Map::new()),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected malformed JSON body");
            Err(ApiError::BadRequest("JSON inválido".to_string()))
        }
    }
}

/// Whether `id` starts with the prefix reserved for its resource
pub fn has_prefix(id: &str, prefix: char) -> bool {
    id.starts_with(prefix)
}
