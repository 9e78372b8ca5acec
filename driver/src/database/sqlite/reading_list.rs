use error_stack::Report;
use sqlx::SqliteConnection;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::repository::ReadingListRepository;
use kernel::prelude::entity::{Book, BookId, User};
use kernel::KernelError;

use crate::database::sqlite::book::SqliteBookInternal;
use crate::database::sqlite::user::SqliteUserInternal;
use crate::database::SqliteRepository;
use crate::error::ConvertError;

#[async_trait::async_trait]
impl ReadingListRepository for SqliteRepository {
    async fn add_to_reading_list(
        &self,
        user: &mut User,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let mut con = self.db.transact().await?;
        let user_id = SqliteUserInternal::find_id_by_name(&mut con, user.user_name())
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Validation)
                    .attach_printable(format!("user {} is not registered", user.user_name()))
            })?;
        let stored = SqliteBookInternal::find_by_id(&mut con, book.id())
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Validation)
                    .attach_printable(format!("book {} is not in the catalog", book.id()))
            })?;
        SqliteReadingListInternal::create(&mut con, user_id, book.id()).await?;
        con.commit().await?;
        user.read_a_book(&stored);
        tracing::debug!("{} read {}", user, stored);
        Ok(())
    }

    async fn remove_from_reading_list(
        &self,
        user: &mut User,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let mut con = self.db.transact().await?;
        let user_id = SqliteUserInternal::find_id_by_name(&mut con, user.user_name())
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Validation)
                    .attach_printable(format!("user {} is not registered", user.user_name()))
            })?;
        SqliteReadingListInternal::delete(&mut con, user_id, book.id()).await?;
        con.commit().await?;
        user.remove_a_book(book);
        Ok(())
    }
}

pub(in crate::database) struct SqliteReadingListInternal;

impl SqliteReadingListInternal {
    pub(in crate::database) async fn create(
        con: &mut SqliteConnection,
        user_id: i64,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        // language=sqlite
        sqlx::query(
            r#"
            INSERT INTO user_reading_lists (user_id, book_id)
            VALUES (?, ?)
            "#,
        )
        .bind(user_id)
        .bind(*book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    /// Drops the oldest entry for the pair.
    async fn delete(
        con: &mut SqliteConnection,
        user_id: i64,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        // language=sqlite
        sqlx::query(
            r#"
            DELETE FROM user_reading_lists
            WHERE id = (
                SELECT id
                FROM user_reading_lists
                WHERE user_id = ? AND book_id = ?
                ORDER BY id ASC
                LIMIT 1
            )
            "#,
        )
        .bind(user_id)
        .bind(*book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::repository::{BookRepository, ReadingListRepository, UserRepository};
    use kernel::prelude::entity::{Book, PageCount, User, UserName};
    use kernel::KernelError;

    use crate::database::{SqliteDatabase, SqliteRepository};

    #[tokio::test]
    async fn reading_list_updates_row_and_user() -> error_stack::Result<(), KernelError> {
        let repository = SqliteRepository::new(SqliteDatabase::in_memory().await?);
        let mut book = Book::from_raw(707611, "Superman Archives, Vol. 2")?;
        book.set_num_pages(PageCount::new(120));
        repository.add_book(&book).await?;
        let mut alice = User::new(UserName::new("alice")?, "secret");
        repository.add_user(&alice).await?;

        repository.add_to_reading_list(&mut alice, &book).await?;
        assert_eq!(alice.read_books(), &vec![book.clone()]);
        assert_eq!(*alice.pages_read(), 120);

        let stored = repository
            .get_user(&UserName::new("alice")?)
            .await?
            .expect("alice was stored");
        assert_eq!(stored.read_books(), alice.read_books());
        assert_eq!(*stored.pages_read(), 120);

        repository.remove_from_reading_list(&mut alice, &book).await?;
        assert!(alice.read_books().is_empty());
        assert_eq!(*alice.pages_read(), 0);
        let stored = repository
            .get_user(&UserName::new("alice")?)
            .await?
            .expect("alice was stored");
        assert!(stored.read_books().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_user_or_book_is_rejected() -> error_stack::Result<(), KernelError> {
        let repository = SqliteRepository::new(SqliteDatabase::in_memory().await?);
        let book = Book::from_raw(1, "Stored")?;
        repository.add_book(&book).await?;
        let mut ghost = User::new(UserName::new("ghost")?, "boo");

        let error = repository
            .add_to_reading_list(&mut ghost, &book)
            .await
            .expect_err("ghost is not registered");
        assert_eq!(error.current_context(), &KernelError::Validation);
        assert!(ghost.read_books().is_empty());

        repository.add_user(&ghost).await?;
        let missing = Book::from_raw(2, "Missing")?;
        let error = repository
            .add_to_reading_list(&mut ghost, &missing)
            .await
            .expect_err("book 2 is not stored");
        assert_eq!(error.current_context(), &KernelError::Validation);
        assert_eq!(*ghost.pages_read(), 0);
        Ok(())
    }
}
