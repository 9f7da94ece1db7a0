/// User endpoints
///
/// # Endpoints
///
/// - `GET /users?q=` - List users, optionally filtered by name
/// - `POST /users` - Create user
/// - `DELETE /users/:id` - Delete user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{has_prefix, parse_object, MessageResponse, SearchParams},
};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Json,
};
use tasklink_shared::{
    auth::password,
    db::write::WriteTransaction,
    models::user::{CreateUser, User},
    validation::{check, Rule},
};

/// Ids of deletable users start with this letter
pub const USER_ID_PREFIX: char = 'f';

/// List users
///
/// # Endpoint
///
/// ```text
/// GET /users
/// GET /users?q=ana
/// ```
///
/// # Response
///
/// ```json
/// [
///   { "id": "f001", "name": "Ana", "email": "ana@mail.com" }
/// ]
/// ```
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<User>>> {
    let users = User::list(&state.db, params.q.as_deref()).await?;

    Ok(Json(users))
}

/// Create user
///
/// Fields are checked in order (`id`, `name`, `email`, `password`) and the
/// first failure is returned. The password is hashed up front; the duplicate
/// checks and the insert then share one write transaction.
///
/// # Endpoint
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// {
///   "id": "f001",
///   "name": "Ana",
///   "email": "ana@mail.com",
///   "password": "Abcdef1!"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "usuário cadastrado com sucesso",
///   "user": { "id": "f001", "name": "Ana", "email": "ana@mail.com" }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Invalid field, or `id` / `email` already taken
/// - `500 Internal Server Error`: Server error
pub async fn create_user(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<MessageResponse<User>>> {
    let fields = parse_object(&body)?;

    let id = check("id", fields.get("id"), &[Rule::MinLength(2)])?;
    let name = check("name", fields.get("name"), &[Rule::MinLength(2)])?;
    let email = check("email", fields.get("email"), &[Rule::Email, Rule::MinLength(2)])?;
    let plain_password = check("password", fields.get("password"), &[Rule::Password])?;

    let password_hash = password::hash_password(&plain_password)?;

    let mut tx = WriteTransaction::begin(&state.db).await?;

    if User::find_by_id(&mut *tx, &id).await?.is_some() {
        return Err(ApiError::BadRequest("'id' já existe".to_string()));
    }

    if User::find_by_email(&mut *tx, &email).await?.is_some() {
        return Err(ApiError::BadRequest("'email' já existe".to_string()));
    }

    let user = User::create(
        &mut *tx,
        CreateUser {
            id,
            name,
            email,
            password_hash,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(user_id = %user.id, "User created");

    Ok(Json(MessageResponse::with_record(
        "usuário cadastrado com sucesso",
        user,
    )))
}

/// Delete user
///
/// # Endpoint
///
/// ```text
/// DELETE /users/:id
/// ```
///
/// # Response
///
/// ```json
/// { "message": "usuário deletado com sucesso" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Id does not start with `f`
/// - `404 Not Found`: No user with that id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse<()>>> {
    if !has_prefix(&id, USER_ID_PREFIX) {
        return Err(ApiError::BadRequest(format!(
            "'id' deve iniciar com a letra '{}'",
            USER_ID_PREFIX
        )));
    }

    if !User::delete(&state.db, &id).await? {
        return Err(ApiError::NotFound("'id' não existe".to_string()));
    }

    tracing::info!(user_id = %id, "User deleted");

    Ok(Json(MessageResponse::message("usuário deletado com sucesso")))
}
