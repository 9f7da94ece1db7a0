/// Database models for TaskLink
///
/// Each model owns the SQL for its table. Query functions are generic over
/// [`sqlx::Executor`], so the same call works against the pool or inside a
/// transaction (`&mut *tx`).
///
/// # Models
///
/// - `user`: People that tasks can be assigned to
/// - `task`: To-do items with a completion flag
/// - `user_task`: Many-to-many assignment rows
///
/// # Example
///
/// ```no_run
/// use tasklink_shared::db::pool::{create_pool, DatabaseConfig};
/// use tasklink_shared::models::task::{CreateTask, Task};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::in_memory()).await?;
///
/// let mut tx = pool.begin().await?;
/// if Task::find_by_id(&mut *tx, "t001").await?.is_none() {
///     Task::create(&mut *tx, CreateTask {
///         id: "t001".to_string(),
///         title: "Write report".to_string(),
///         description: "Quarterly numbers".to_string(),
///     }).await?;
/// }
/// tx.commit().await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
pub mod user_task;
