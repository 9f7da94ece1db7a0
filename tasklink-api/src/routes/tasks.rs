/// Task endpoints
///
/// # Endpoints
///
/// - `GET /tasks?q=` - List tasks, optionally filtered by title or description
/// - `POST /tasks` - Create task
/// - `PUT /tasks/:id` - Merge-update task
/// - `DELETE /tasks/:id` - Delete task

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
use serde_json::{Map, Value};
use tasklink_shared::{
    db::write::WriteTransaction,
    models::task::{CreateTask, Task, TaskChanges},
    validation::{check, check_optional, lenient_status, Rule},
};

/// Ids of deletable tasks start with this letter
pub const TASK_ID_PREFIX: char = 't';

/// List tasks
///
/// # Endpoint
///
/// ```text
/// GET /tasks
/// GET /tasks?q=report
/// ```
///
/// # Response
///
/// ```json
/// [
///   {
///     "id": "t001",
///     "title": "Write report",
///     "description": "Quarterly numbers",
///     "created_at": "2024-06-01 09:30:00",
///     "status": 0
///   }
/// ]
/// ```
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list(&state.db, params.q.as_deref()).await?;

    Ok(Json(tasks))
}

/// Create task
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Content-Type: application/json
///
/// { "id": "t001", "title": "Write report", "description": "Quarterly numbers" }
/// ```
///
/// # Response
///
/// The stored row, including the defaulted `created_at` and `status`:
///
/// ```json
/// {
///   "message": "tarefa cadastrada com sucesso",
///   "user": { "id": "t001", "title": "Write report", "description": "Quarterly numbers",
///             "created_at": "2024-06-01 09:30:00", "status": 0 }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Invalid field or `id` already taken
pub async fn create_task(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<MessageResponse<Task>>> {
    let fields = parse_object(&body)?;

    let id = check("id", fields.get("id"), &[Rule::MinLength(2)])?;
    let title = check("title", fields.get("title"), &[Rule::MinLength(2)])?;
    let description = check("description", fields.get("description"), &[])?;

    let mut tx = WriteTransaction::begin(&state.db).await?;

    if Task::find_by_id(&mut *tx, &id).await?.is_some() {
        return Err(ApiError::BadRequest("'id' já existe".to_string()));
    }

    let task = Task::create(
        &mut *tx,
        CreateTask {
            id,
            title,
            description,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(task_id = %task.id, "Task created");

    Ok(Json(MessageResponse::with_record(
        "tarefa cadastrada com sucesso",
        task,
    )))
}

/// `created_at`, also accepted under its camelCase name
///
/// Returns the key the client used so errors name that key.
fn created_at_field(fields: &Map<String, Value>) -> (&'static str, Option<&Value>) {
    match fields.get("created_at") {
        Some(value) => ("created_at", Some(value)),
        None => ("createdAt", fields.get("createdAt")),
    }
}

/// Update task
///
/// Every field is optional and only the supplied ones are validated. Supplied
/// values are merged over the stored row with [`Task::merge`]: empty strings
/// keep the stored value, and `status` is taken from any number or numeric
/// string.
///
/// # Endpoint
///
/// ```text
/// PUT /tasks/:id
/// Content-Type: application/json
///
/// { "title": "Review report", "status": 1 }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "tarefa atualizada com sucesso",
///   "user": { "id": "t001", "title": "Review report", "description": "Quarterly numbers",
///             "created_at": "2024-06-01 09:30:00", "status": 1 }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Invalid field, or the new `id` belongs to another task
/// - `404 Not Found`: No task with that id
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<MessageResponse<Task>>> {
    let fields = parse_object(&body)?;

    let (created_at_key, created_at) = created_at_field(&fields);

    let changes = TaskChanges {
        id: check_optional("id", fields.get("id"), &[Rule::MinLength(2)])?,
        title: check_optional("title", fields.get("title"), &[Rule::MinLength(2)])?,
        description: check_optional("description", fields.get("description"), &[])?,
        created_at: check_optional(created_at_key, created_at, &[])?,
        status: lenient_status(fields.get("status")),
    };

    let mut tx = WriteTransaction::begin(&state.db).await?;

    let current = Task::find_by_id(&mut *tx, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("'id' não encontrado".to_string()))?;

    let merged = current.merge(changes);

    if merged.id != current.id && Task::find_by_id(&mut *tx, &merged.id).await?.is_some() {
        return Err(ApiError::BadRequest("'id' já existe".to_string()));
    }

    let task = Task::replace(&mut *tx, &current.id, &merged)
        .await?
        .ok_or_else(|| ApiError::NotFound("'id' não encontrado".to_string()))?;

    tx.commit().await?;

    tracing::info!(task_id = %current.id, new_task_id = %task.id, "Task updated");

    Ok(Json(MessageResponse::with_record(
        "tarefa atualizada com sucesso",
        task,
    )))
}

/// Delete task
///
/// # Endpoint
///
/// ```text
/// DELETE /tasks/:id
/// ```
///
/// # Response
///
/// ```json
/// { "message": "tarefa deletada com sucesso" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Id does not start with `t`
/// - `404 Not Found`: No task with that id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse<()>>> {
    if !has_prefix(&id, TASK_ID_PREFIX) {
        return Err(ApiError::BadRequest(format!(
            "'id' deve iniciar com a letra '{}'",
            TASK_ID_PREFIX
        )));
    }

    if !Task::delete(&state.db, &id).await? {
        return Err(ApiError::NotFound("'id' não existe".to_string()));
    }

    tracing::info!(task_id = %id, "Task deleted");

    Ok(Json(MessageResponse::message("tarefa deletada com sucesso")))
}
