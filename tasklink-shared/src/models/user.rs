/// User model and database operations
///
/// Users are created with a caller-supplied id and never updated. The stored
/// password is an Argon2id hash and is never serialized back to clients.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id TEXT PRIMARY KEY NOT NULL,
///     name TEXT NOT NULL,
///     email TEXT NOT NULL UNIQUE,
///     password TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasklink_shared::models::user::{CreateUser, User};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     id: "f001".to_string(),
///     name: "Ana".to_string(),
///     email: "ana@mail.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
///
/// let matches = User::list(&pool, Some("An")).await?;
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::{Executor, QueryBuilder, Sqlite};

/// A row of the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Caller-supplied id (deletable ids start with `f`)
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address, unique across users
    pub email: String,

    /// Argon2id hash of the password
    #[sqlx(rename = "password")]
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: String,
    pub name: String,
    pub email: String,

    /// Already-hashed password
    pub password_hash: String,
}

impl User {
    /// Inserts a user and returns the stored row
    ///
    /// # Errors
    ///
    /// Fails with a unique-constraint violation when the id or email is taken
    pub async fn create<'e, E>(executor: E, data: CreateUser) -> Result<Self, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, email, password
            "#,
        )
        .bind(data.id)
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(executor)
        .await
    }

    /// Finds a user by id
    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, User>("SELECT id, name, email, password FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Finds a user by email (exact match)
    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, User>("SELECT id, name, email, password FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(executor)
            .await
    }

    /// Lists users in insertion order
    ///
    /// With a search term, only users whose name contains it are returned.
    /// Matching follows SQLite `LIKE`, which ignores ASCII case.
    pub async fn list<'e, E>(executor: E, search: Option<&str>) -> Result<Vec<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT id, name, email, password FROM users");

        if let Some(term) = search {
            query.push(" WHERE name LIKE ").push_bind(format!("%{}%", term));
        }

        query.push(" ORDER BY rowid");

        query.build_query_as::<User>().fetch_all(executor).await
    }

    /// Deletes a user; assignments referencing it cascade
    ///
    /// Returns whether a row was removed.
    pub async fn delete<'e, E>(executor: E, id: &str) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
