/// Integration tests for the database connection pool
///
/// These run against SQLite: in-memory for most cases and a temporary file
/// when on-disk behaviour matters.

use tasklink_shared::db::pool::{close_pool, create_pool, health_check, DatabaseConfig};

fn temp_database_url(name: &str) -> (std::path::PathBuf, String) {
    let path = std::env::temp_dir().join(format!("tasklink-{}-{}.db", name, std::process::id()));
    remove_database(&path);
    let url = format!("sqlite://{}", path.display());
    (path, url)
}

fn remove_database(path: &std::path::Path) {
    let _ = std::fs::remove_file(path);
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = path.as_os_str().to_owned();
        sidecar.push(suffix);
        let _ = std::fs::remove_file(sidecar);
    }
}

#[tokio::test]
async fn test_create_in_memory_pool() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    assert_eq!(pool.size(), 1);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_create_pool_creates_missing_file() {
    let (path, url) = temp_database_url("create");

    let pool = create_pool(DatabaseConfig {
        url,
        max_connections: 2,
        ..Default::default()
    })
    .await
    .expect("Failed to create pool");

    assert!(path.exists(), "Database file should be created");

    close_pool(pool).await;
    remove_database(&path);
}

#[tokio::test]
async fn test_file_database_uses_wal() {
    let (path, url) = temp_database_url("wal");

    let pool = create_pool(DatabaseConfig {
        url,
        ..Default::default()
    })
    .await
    .expect("Failed to create pool");

    let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(&pool)
        .await
        .expect("Failed to read pragma");

    assert_eq!(mode.to_lowercase(), "wal");

    close_pool(pool).await;
    remove_database(&path);
}

#[tokio::test]
async fn test_create_pool_in_missing_directory() {
    let result = create_pool(DatabaseConfig {
        url: "sqlite:///nonexistent-tasklink-dir/nested/tasklink.db".to_string(),
        acquire_timeout_seconds: 2,
        ..Default::default()
    })
    .await;

    assert!(result.is_err(), "Database in a missing directory cannot be opened");
}

#[tokio::test]
async fn test_health_check_success() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    assert!(health_check(&pool).await.is_ok());

    close_pool(pool).await;
}

#[tokio::test]
async fn test_foreign_keys_enabled() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .expect("Failed to read pragma");

    assert_eq!(enabled, 1);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_in_memory_state_survives_across_queries() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    sqlx::query("CREATE TABLE scratch (value INTEGER)")
        .execute(&pool)
        .await
        .expect("Failed to create table");
    sqlx::query("INSERT INTO scratch (value) VALUES (7)")
        .execute(&pool)
        .await
        .expect("Failed to insert");

    let value: i64 = sqlx::query_scalar("SELECT value FROM scratch")
        .fetch_one(&pool)
        .await
        .expect("Table should still exist");

    assert_eq!(value, 7);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_close_pool() {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");

    let handle = pool.clone();
    close_pool(pool).await;

    assert!(handle.is_closed());
    assert!(sqlx::query("SELECT 1").execute(&handle).await.is_err());
}
