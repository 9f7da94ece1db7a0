/// Task model and database operations
///
/// Tasks carry a caller-supplied id, a title and description, a creation
/// timestamp defaulted by the database, and a completion flag.
///
/// # Status
///
/// ```text
/// 0 → incomplete (default)
/// 1 → complete
/// ```
///
/// Other integers are stored as given; the API accepts status leniently.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id TEXT PRIMARY KEY NOT NULL,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL,
///     created_at TEXT NOT NULL DEFAULT (DATETIME('now')),
///     status INTEGER NOT NULL DEFAULT 0
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasklink_shared::models::task::{CreateTask, Task, TaskChanges};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     id: "t001".to_string(),
///     title: "Write report".to_string(),
///     description: "Quarterly numbers".to_string(),
/// }).await?;
///
/// let done = task.merge(TaskChanges { status: Some(1), ..Default::default() });
/// Task::replace(&pool, "t001", &done).await?;
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::{Executor, QueryBuilder, Sqlite};

/// A row of the `tasks` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Caller-supplied id (deletable ids start with `t`)
    pub id: String,

    pub title: String,

    pub description: String,

    /// Creation timestamp as stored (`YYYY-MM-DD HH:MM:SS` unless overwritten)
    pub created_at: String,

    /// Completion flag, see module docs
    pub status: i64,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Partial update for a task
///
/// `None` keeps the stored value. Empty strings keep it as well (see [`Task::merge`]).
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub status: Option<i64>,
}

fn non_empty_or(supplied: Option<String>, current: &str) -> String {
    match supplied {
        Some(value) if !value.is_empty() => value,
        _ => current.to_string(),
    }
}

impl Task {
    /// Applies `changes` over this row
    ///
    /// Supplied strings replace the stored ones unless they are empty, in
    /// which case the stored value wins. A supplied status always applies,
    /// including `0`.
    pub fn merge(&self, changes: TaskChanges) -> Task {
        Task {
            id: non_empty_or(changes.id, &self.id),
            title: non_empty_or(changes.title, &self.title),
            description: non_empty_or(changes.description, &self.description),
            created_at: non_empty_or(changes.created_at, &self.created_at),
            status: changes.status.unwrap_or(self.status),
        }
    }

    /// Inserts a task and returns the stored row, including database defaults
    ///
    /// # Errors
    ///
    /// Fails with a unique-constraint violation when the id is taken
    pub async fn create<'e, E>(executor: E, data: CreateTask) -> Result<Self, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (id, title, description)
            VALUES (?, ?, ?)
            RETURNING id, title, description, created_at, status
            "#,
        )
        .bind(data.id)
        .bind(data.title)
        .bind(data.description)
        .fetch_one(executor)
        .await
    }

    /// Finds a task by id
    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Task>(
            "SELECT id, title, description, created_at, status FROM tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Lists tasks in insertion order
    ///
    /// With a search term, returns tasks whose title or description contains it.
    pub async fn list<'e, E>(executor: E, search: Option<&str>) -> Result<Vec<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, title, description, created_at, status FROM tasks",
        );

        if let Some(term) = search {
            let pattern = format!("%{}%", term);
            query
                .push(" WHERE title LIKE ")
                .push_bind(pattern.clone())
                .push(" OR description LIKE ")
                .push_bind(pattern);
        }

        query.push(" ORDER BY rowid");

        query.build_query_as::<Task>().fetch_all(executor).await
    }

    /// Overwrites every column of the task currently stored under `current_id`
    ///
    /// `task.id` may differ from `current_id`; assignments follow the rename
    /// through `ON UPDATE CASCADE`. Returns `None` when no row had `current_id`.
    pub async fn replace<'e, E>(
        executor: E,
        current_id: &str,
        task: &Task,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET id = ?, title = ?, description = ?, created_at = ?, status = ?
            WHERE id = ?
            RETURNING id, title, description, created_at, status
            "#,
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.created_at)
        .bind(task.status)
        .bind(current_id)
        .fetch_optional(executor)
        .await
    }

    /// Deletes a task; assignments referencing it cascade
    ///
    /// Returns whether a row was removed.
    pub async fn delete<'e, E>(executor: E, id: &str) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
