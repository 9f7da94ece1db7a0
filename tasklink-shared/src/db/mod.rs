/// Database layer for TaskLink
///
/// # Modules
///
/// - `pool`: SQLite connection pool management with health checks
/// - `migrations`: Embedded schema migrations
/// - `write`: Write transactions that take the write lock up front
/// - Models are in the `models` module at crate root level
///
/// # Example
///
/// ```no_run
/// use tasklink_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: "sqlite://tasklink.db".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     tasklink_shared::db::migrations::run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
pub mod write;
