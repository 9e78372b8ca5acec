use error_stack::Report;
use sqlx::SqliteConnection;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::repository::AuthorRepository;
use kernel::prelude::entity::{Author, AuthorId, BookId};
use kernel::KernelError;

use crate::database::sqlite::single;
use crate::database::SqliteRepository;
use crate::error::ConvertError;

#[async_trait::async_trait]
impl AuthorRepository for SqliteRepository {
    async fn add_author(&self, author: &Author) -> error_stack::Result<(), KernelError> {
        let mut con = self.db.transact().await?;
        SqliteAuthorInternal::create(&mut con, author).await?;
        con.commit().await?;
        tracing::debug!("stored {}", author);
        Ok(())
    }

    async fn get_author(&self, id: &AuthorId) -> error_stack::Result<Option<Author>, KernelError> {
        let mut con = self.db.transact().await?;
        SqliteAuthorInternal::find_by_id(&mut con, id).await
    }

    async fn get_authors(&self) -> error_stack::Result<Vec<Author>, KernelError> {
        let mut con = self.db.transact().await?;
        SqliteAuthorInternal::find_all_ordered_by_name(&mut con).await
    }
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    author_id: i64,
    full_name: String,
}

impl TryFrom<AuthorRow> for Author {
    type Error = Report<KernelError>;
    fn try_from(value: AuthorRow) -> Result<Self, Self::Error> {
        Author::from_raw(value.author_id, value.full_name)
    }
}

pub(in crate::database) struct SqliteAuthorInternal;

impl SqliteAuthorInternal {
    async fn create(
        con: &mut SqliteConnection,
        author: &Author,
    ) -> error_stack::Result<(), KernelError> {
        // language=sqlite
        sqlx::query(
            r#"
            INSERT INTO authors (author_id, full_name)
            VALUES (?, ?)
            "#,
        )
        .bind(*author.id().as_ref())
        .bind(author.full_name().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    /// Leaves an already stored author untouched.
    pub(in crate::database) async fn create_if_absent(
        con: &mut SqliteConnection,
        author: &Author,
    ) -> error_stack::Result<(), KernelError> {
        // language=sqlite
        sqlx::query(
            r#"
            INSERT INTO authors (author_id, full_name)
            VALUES (?, ?)
            ON CONFLICT (author_id) DO NOTHING
            "#,
        )
        .bind(*author.id().as_ref())
        .bind(author.full_name().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn find_by_id(
        con: &mut SqliteConnection,
        id: &AuthorId,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            // language=sqlite
            r#"
            SELECT author_id, full_name
            FROM authors
            WHERE author_id = ?
            "#,
        )
        .bind(*id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        single(rows, || format!("author {}", id))?
            .map(Author::try_from)
            .transpose()
    }

    pub(in crate::database) async fn find_all_ordered_by_name(
        con: &mut SqliteConnection,
    ) -> error_stack::Result<Vec<Author>, KernelError> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            // language=sqlite
            r#"
            SELECT author_id, full_name
            FROM authors
            ORDER BY full_name ASC, author_id ASC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Author::try_from).collect()
    }

    /// Authors of `book_id` in the order they were attached.
    pub(in crate::database) async fn find_for_book(
        con: &mut SqliteConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Author>, KernelError> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            // language=sqlite
            r#"
            SELECT a.author_id, a.full_name
            FROM book_authors ba
            JOIN authors a ON a.author_id = ba.author_id
            WHERE ba.book_id = ?
            ORDER BY ba.id
            "#,
        )
        .bind(*book_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Author::try_from).collect()
    }

    pub(in crate::database) async fn attach_to_book(
        con: &mut SqliteConnection,
        book_id: &BookId,
        author: &Author,
    ) -> error_stack::Result<(), KernelError> {
        Self::create_if_absent(&mut *con, author).await?;
        // language=sqlite
        sqlx::query(
            r#"
            INSERT INTO book_authors (book_id, author_id)
            VALUES (?, ?)
            "#,
        )
        .bind(*book_id.as_ref())
        .bind(*author.id().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::repository::AuthorRepository;
    use kernel::prelude::entity::{Author, AuthorId};
    use kernel::KernelError;

    use crate::database::{SqliteDatabase, SqliteRepository};

    #[tokio::test]
    async fn authors_round_trip() -> error_stack::Result<(), KernelError> {
        let repository = SqliteRepository::new(SqliteDatabase::in_memory().await?);
        let gaiman = Author::from_raw(2, "Neil Gaiman")?;
        let ennis = Author::from_raw(1, "Garth Ennis")?;
        repository.add_author(&gaiman).await?;
        repository.add_author(&ennis).await?;

        let found = repository.get_author(&AuthorId::new(2)?).await?;
        assert_eq!(found.map(|author| author.full_name().to_string()), Some("Neil Gaiman".into()));
        assert!(repository.get_author(&AuthorId::new(3)?).await?.is_none());

        let names = repository
            .get_authors()
            .await?
            .into_iter()
            .map(|author| author.full_name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Garth Ennis", "Neil Gaiman"]);
        Ok(())
    }

    #[tokio::test]
    async fn same_id_twice_is_rejected() -> error_stack::Result<(), KernelError> {
        let repository = SqliteRepository::new(SqliteDatabase::in_memory().await?);
        repository.add_author(&Author::from_raw(7, "Alan Moore")?).await?;
        let result = repository.add_author(&Author::from_raw(7, "Alan Moore")?).await;
        let error = result.expect_err("author ids are unique");
        assert_eq!(error.current_context(), &KernelError::Persistence);
        assert_eq!(repository.get_authors().await?.len(), 1);
        Ok(())
    }
}
