/// User-task assignment rows
///
/// A join row links one user to one task. Rows have no identity beyond the
/// pair and are removed only through the cascades on `users` and `tasks`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users_tasks (
///     user_id TEXT NOT NULL REFERENCES users (id) ON DELETE CASCADE ON UPDATE CASCADE,
///     task_id TEXT NOT NULL REFERENCES tasks (id) ON DELETE CASCADE ON UPDATE CASCADE,
///     PRIMARY KEY (user_id, task_id)
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::{Executor, Sqlite};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserTask {
    pub task_id: String,
    pub user_id: String,
}

impl UserTask {
    /// Links a user to a task
    ///
    /// # Errors
    ///
    /// Fails with a foreign-key violation if either row is missing, or a
    /// unique-constraint violation if the pair already exists
    pub async fn create<'e, E>(executor: E, task_id: &str, user_id: &str) -> Result<Self, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, UserTask>(
            r#"
            INSERT INTO users_tasks (task_id, user_id)
            VALUES (?, ?)
            RETURNING task_id, user_id
            "#,
        )
        .bind(task_id)
        .bind(user_id)
        .fetch_one(executor)
        .await
    }

    /// Whether the user is already assigned to the task
    pub async fn exists<'e, E>(executor: E, task_id: &str, user_id: &str) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users_tasks WHERE task_id = ? AND user_id = ?",
        )
        .bind(task_id)
        .bind(user_id)
        .fetch_one(executor)
        .await?;

        Ok(count > 0)
    }
}
