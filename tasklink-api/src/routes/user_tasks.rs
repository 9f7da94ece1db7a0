/// User-task assignment endpoint
///
/// # Endpoints
///
/// - `POST /tasks/:id/users/:user_id` - Assign a user to a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{
        has_prefix, tasks::TASK_ID_PREFIX, users::USER_ID_PREFIX, MessageResponse,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tasklink_shared::{
    db::write::WriteTransaction,
    models::{task::Task, user::User, user_task::UserTask},
};

/// Assign a user to a task
///
/// Checks run in a fixed order and the first failure wins: task id prefix,
/// user id prefix, task existence, user existence, existing assignment.
///
/// # Endpoint
///
/// ```text
/// POST /tasks/t001/users/f001
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "message": "usuário atribuído à tarefa com sucesso" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Wrong id prefix or user already assigned
/// - `404 Not Found`: Task or user missing
pub async fn assign_user(
    State(state): State<AppState>,
    Path((task_id, user_id)): Path<(String, String)>,
) -> ApiResult<(StatusCode, Json<MessageResponse<()>>)> {
    if !has_prefix(&task_id, TASK_ID_PREFIX) {
        return Err(ApiError::BadRequest(format!(
            "'taskId' deve iniciar com a letra '{}'",
            TASK_ID_PREFIX
        )));
    }

    if !has_prefix(&user_id, USER_ID_PREFIX) {
        return Err(ApiError::BadRequest(format!(
            "'userId' deve iniciar com a letra '{}'",
            USER_ID_PREFIX
        )));
    }

    let mut tx = WriteTransaction::begin(&state.db).await?;

    if Task::find_by_id(&mut *tx, &task_id).await?.is_none() {
        return Err(ApiError::NotFound("'taskId' não existe".to_string()));
    }

    if User::find_by_id(&mut *tx, &user_id).await?.is_none() {
        return Err(ApiError::NotFound("'userId' não existe".to_string()));
    }

    if UserTask::exists(&mut *tx, &task_id, &user_id).await? {
        return Err(ApiError::BadRequest("usuário já atribuído à tarefa".to_string()));
    }

    UserTask::create(&mut *tx, &task_id, &user_id).await?;

    tx.commit().await?;

    tracing::info!(task_id = %task_id, user_id = %user_id, "User assigned to task");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::message("usuário atribuído à tarefa com sucesso")),
    ))
}
