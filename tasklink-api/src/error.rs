/// Error handling for the API server
///
/// Handlers return `ApiResult<T>`; any `ApiError` becomes an HTTP response
/// whose body is the bare message as `text/plain`, e.g. `'id' já existe`.
///
/// # Example
///
/// ```
/// use tasklink_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::{json, Value};
///
/// async fn handler(id: String) -> ApiResult<Json<Value>> {
///     if !id.starts_with('f') {
///         return Err(ApiError::BadRequest("'id' deve iniciar com a letra 'f'".to_string()));
///     }
///     Ok(Json(json!({ "id": id })))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use tasklink_shared::{auth::password::PasswordError, validation::ValidationError};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Body sent for failures whose details stay in the logs
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Erro inesperado";

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400): validation failures, duplicates, wrong id prefixes
    BadRequest(String),

    /// Not found (404)
    NotFound(String),

    /// Internal server error (500)
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => {
                tracing::debug!(status = status.as_u16(), "{}", msg);
                msg
            }
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                UNEXPECTED_ERROR_MESSAGE.to_string()
            }
        };

        (status, message).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.message)
    }
}

/// Convert sqlx errors to API errors
///
/// Unique violations only reach this point when a concurrent request won the
/// race past the explicit duplicate checks; they are still the client's fault.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                let message = db_err.message();
                if message.contains("users_tasks") {
                    ApiError::BadRequest("usuário já atribuído à tarefa".to_string())
                } else if message.contains(".email") {
                    ApiError::BadRequest("'email' já existe".to_string())
                } else {
                    ApiError::BadRequest("'id' já existe".to_string())
                }
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}
