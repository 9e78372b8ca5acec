use sqlx::SqliteConnection;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::repository::PublisherRepository;
use kernel::prelude::entity::{Publisher, PublisherName};
use kernel::KernelError;

use crate::database::sqlite::single;
use crate::database::SqliteRepository;
use crate::error::ConvertError;

#[async_trait::async_trait]
impl PublisherRepository for SqliteRepository {
    async fn add_publisher(&self, publisher: &Publisher) -> error_stack::Result<(), KernelError> {
        let mut con = self.db.transact().await?;
        SqlitePublisherInternal::create(&mut con, publisher).await?;
        con.commit().await?;
        tracing::debug!("stored {}", publisher);
        Ok(())
    }

    async fn get_publisher(
        &self,
        name: &PublisherName,
    ) -> error_stack::Result<Option<Publisher>, KernelError> {
        let mut con = self.db.transact().await?;
        SqlitePublisherInternal::find_by_name(&mut con, name).await
    }

    async fn get_publishers(&self) -> error_stack::Result<Vec<Publisher>, KernelError> {
        let mut con = self.db.transact().await?;
        SqlitePublisherInternal::find_all(&mut con).await
    }
}

#[derive(sqlx::FromRow)]
struct PublisherRow {
    id: i64,
    name: String,
}

impl From<PublisherRow> for Publisher {
    fn from(value: PublisherRow) -> Self {
        Publisher::new(value.name)
    }
}

pub(in crate::database) struct SqlitePublisherInternal;

impl SqlitePublisherInternal {
    /// Returns the generated row id.
    pub(in crate::database) async fn create(
        con: &mut SqliteConnection,
        publisher: &Publisher,
    ) -> error_stack::Result<i64, KernelError> {
        // language=sqlite
        let result = sqlx::query(
            r#"
            INSERT INTO publishers (name)
            VALUES (?)
            "#,
        )
        .bind(publisher.name().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.last_insert_rowid())
    }

    /// Id of the publisher called `publisher`'s name, inserting it when missing.
    pub(in crate::database) async fn resolve(
        con: &mut SqliteConnection,
        publisher: &Publisher,
    ) -> error_stack::Result<i64, KernelError> {
        let found = Self::find_row_by_name(&mut *con, publisher.name()).await?;
        match found {
            Some(row) => Ok(row.id),
            None => Self::create(con, publisher).await,
        }
    }

    pub(in crate::database) async fn find_by_id(
        con: &mut SqliteConnection,
        id: i64,
    ) -> error_stack::Result<Option<Publisher>, KernelError> {
        let row = sqlx::query_as::<_, PublisherRow>(
            // language=sqlite
            r#"
            SELECT id, name
            FROM publishers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Publisher::from))
    }

    async fn find_by_name(
        con: &mut SqliteConnection,
        name: &PublisherName,
    ) -> error_stack::Result<Option<Publisher>, KernelError> {
        let row = Self::find_row_by_name(con, name).await?;
        Ok(row.map(Publisher::from))
    }

    async fn find_row_by_name(
        con: &mut SqliteConnection,
        name: &PublisherName,
    ) -> error_stack::Result<Option<PublisherRow>, KernelError> {
        let rows = sqlx::query_as::<_, PublisherRow>(
            // language=sqlite
            r#"
            SELECT id, name
            FROM publishers
            WHERE name = ?
            "#,
        )
        .bind(name.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        single(rows, || format!("publisher {}", name))
    }

    async fn find_all(
        con: &mut SqliteConnection,
    ) -> error_stack::Result<Vec<Publisher>, KernelError> {
        let rows = sqlx::query_as::<_, PublisherRow>(
            // language=sqlite
            r#"
            SELECT id, name
            FROM publishers
            ORDER BY id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Publisher::from).collect())
    }

    pub(in crate::database) async fn find_all_ordered_by_name(
        con: &mut SqliteConnection,
    ) -> error_stack::Result<Vec<Publisher>, KernelError> {
        let rows = sqlx::query_as::<_, PublisherRow>(
            // language=sqlite
            r#"
            SELECT id, name
            FROM publishers
            ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Publisher::from).collect())
    }
}
