mod author;
mod book;
mod publisher;
mod reading_list;
mod review;
mod user;

use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use error_stack::Report;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::error::ConvertError;

#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    pub async fn connect(url: &str) -> error_stack::Result<Self, KernelError> {
        let options = SqliteConnectOptions::from_str(url)
            .convert_error()?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .convert_error()?;
        Self::migrate(pool).await
    }

    /// A private database living as long as the returned handle.
    pub async fn in_memory() -> error_stack::Result<Self, KernelError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .convert_error()?
            .foreign_keys(true);
        // Every connection to :memory: opens a fresh database, so keep exactly one alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .convert_error()?;
        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> error_stack::Result<Self, KernelError> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .convert_error()?;
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for SqliteDatabase {
    type Transaction = SqliteTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let con = self.pool.begin().await.convert_error()?;
        Ok(SqliteTransaction(con))
    }
}

pub struct SqliteTransaction(sqlx::Transaction<'static, Sqlite>);

#[async_trait::async_trait]
impl Transaction for SqliteTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for SqliteTransaction {
    type Target = SqliteConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SqliteTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Relational backend. Every call runs in its own transaction and commits
/// before returning.
#[derive(Clone)]
pub struct SqliteRepository {
    db: SqliteDatabase,
}

impl SqliteRepository {
    pub fn new(db: SqliteDatabase) -> Self {
        Self { db }
    }

    /// Deletes every row, children before parents.
    pub async fn clear(&self) -> error_stack::Result<(), KernelError> {
        let mut con = self.db.transact().await?;
        for table in [
            "user_reading_lists",
            "book_authors",
            "reviews",
            "books",
            "authors",
            "publishers",
            "users",
        ] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *con)
                .await
                .convert_error()?;
        }
        con.commit().await?;
        tracing::debug!("cleared all tables");
        Ok(())
    }

    /// True when no book has been stored yet.
    pub async fn is_empty(&self) -> error_stack::Result<bool, KernelError> {
        let mut con = self.db.transact().await?;
        let count = book::SqliteBookInternal::count(&mut con).await?;
        Ok(count == 0)
    }
}

/// Rejects lookups that matched more than one row.
fn single<T>(
    rows: Vec<T>,
    lookup: impl FnOnce() -> String,
) -> error_stack::Result<Option<T>, KernelError> {
    if rows.len() > 1 {
        return Err(Report::new(KernelError::Uniqueness)
            .attach_printable(format!("{} matched {} rows", lookup(), rows.len())));
    }
    Ok(rows.into_iter().next())
}

#[cfg(test)]
mod test {
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::KernelError;

    use crate::database::{SqliteDatabase, SqliteRepository};
    use crate::error::ConvertError;

    #[tokio::test]
    async fn migrations_create_tables() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;
        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(&mut *con)
                .await
                .convert_error()?;
        con.commit().await?;
        let names = tables.into_iter().map(|(name,)| name).collect::<Vec<_>>();
        for table in [
            "authors",
            "book_authors",
            "books",
            "publishers",
            "reviews",
            "user_reading_lists",
            "users",
        ] {
            assert!(names.iter().any(|name| name == table), "missing {table}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn fresh_database_is_empty() -> error_stack::Result<(), KernelError> {
        let repository = SqliteRepository::new(SqliteDatabase::in_memory().await?);
        assert!(repository.is_empty().await?);
        repository.clear().await?;
        assert!(repository.is_empty().await?);
        Ok(())
    }

    #[tokio::test]
    async fn rolled_back_writes_are_discarded() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;
        sqlx::query("INSERT INTO publishers (name) VALUES ('Dargaud')")
            .execute(&mut *con)
            .await
            .convert_error()?;
        con.roll_back().await?;

        let mut con = db.transact().await?;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM publishers")
            .fetch_one(&mut *con)
            .await
            .convert_error()?;
        assert_eq!(count, 0);
        Ok(())
    }
}
