/// Write transactions that hold the database write lock from the start
///
/// `pool.begin()` issues a deferred `BEGIN`: the transaction reads under a
/// shared lock and only asks for the write lock at its first write. SQLite
/// answers that upgrade with `SQLITE_BUSY`, without waiting, whenever another
/// connection committed in between. [`WriteTransaction`] issues
/// `BEGIN IMMEDIATE` instead, so competing writers queue on the busy timeout
/// before their first read.
///
/// Dropping an uncommitted transaction rolls it back before the connection
/// returns to the pool.
///
/// # Example
///
/// ```no_run
/// use tasklink_shared::db::write::WriteTransaction;
/// use tasklink_shared::models::task::Task;
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let mut tx = WriteTransaction::begin(&pool).await?;
///
/// if Task::find_by_id(&mut *tx, "t001").await?.is_none() {
///     // returning here drops `tx`, which rolls back
///     return Ok(());
/// }
///
/// Task::delete(&mut *tx, "t001").await?;
/// tx.commit().await?;
/// # Ok(())
/// # }
/// ```

use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use std::ops::{Deref, DerefMut};
use tracing::warn;

/// A `BEGIN IMMEDIATE` transaction on a pooled connection
///
/// Dereferences to the connection, so `&mut *tx` is an executor the same way
/// it is for [`sqlx::Transaction`].
#[derive(Debug)]
pub struct WriteTransaction {
    // `None` only once committed or dropped
    conn: Option<PoolConnection<Sqlite>>,
}

impl WriteTransaction {
    /// Acquires a connection and takes the write lock
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available, or if the write lock
    /// is still held elsewhere when the busy timeout expires
    pub async fn begin(pool: &SqlitePool) -> Result<Self, sqlx::Error> {
        let mut conn = pool.acquire().await?;

        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

        Ok(Self { conn: Some(conn) })
    }

    /// Commits and releases the connection
    ///
    /// # Errors
    ///
    /// Returns an error if `COMMIT` fails; the transaction is then rolled back
    pub async fn commit(mut self) -> Result<(), sqlx::Error> {
        if let Some(conn) = self.conn.as_mut() {
            sqlx::query("COMMIT").execute(&mut **conn).await?;
        }

        self.conn = None;
        Ok(())
    }
}

impl Deref for WriteTransaction {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        self.conn
            .as_deref()
            .expect("WriteTransaction used after commit")
    }
}

impl DerefMut for WriteTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.conn
            .as_deref_mut()
            .expect("WriteTransaction used after commit")
    }
}

impl Drop for WriteTransaction {
    fn drop(&mut self) {
        let Some(conn) = self.conn.take() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(rollback(conn));
            }
            // Closing the raw connection discards the open transaction
            Err(_) => drop(conn.detach()),
        }
    }
}

async fn rollback(mut conn: PoolConnection<Sqlite>) {
    if let Err(e) = sqlx::query("ROLLBACK").execute(&mut *conn).await {
        warn!(error = %e, "Rollback failed, closing connection");

        if let Err(e) = conn.close().await {
            warn!(error = %e, "Failed to close connection after rollback error");
        }
    }
}
