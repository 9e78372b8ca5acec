use sqlx::SqliteConnection;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::repository::UserRepository;
use kernel::prelude::entity::{User, UserName, UserPassword};
use kernel::KernelError;

use crate::database::sqlite::book::SqliteBookInternal;
use crate::database::sqlite::reading_list::SqliteReadingListInternal;
use crate::database::sqlite::review::SqliteReviewInternal;
use crate::database::sqlite::single;
use crate::database::SqliteRepository;
use crate::error::ConvertError;

#[async_trait::async_trait]
impl UserRepository for SqliteRepository {
    async fn add_user(&self, user: &User) -> error_stack::Result<(), KernelError> {
        let mut con = self.db.transact().await?;
        SqliteUserInternal::create(&mut con, user).await?;
        con.commit().await?;
        tracing::debug!("stored {}", user);
        Ok(())
    }

    async fn get_user(
        &self,
        user_name: &UserName,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let mut con = self.db.transact().await?;
        SqliteUserInternal::find_by_name(&mut con, user_name).await
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    user_name: String,
    password: Option<String>,
}

pub(in crate::database) struct SqliteUserInternal;

impl SqliteUserInternal {
    async fn create(
        con: &mut SqliteConnection,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        // language=sqlite
        let result = sqlx::query(
            r#"
            INSERT INTO users (user_name, password)
            VALUES (?, ?)
            "#,
        )
        .bind(user.user_name().as_ref())
        .bind(user.password().as_ref().map(AsRef::<String>::as_ref))
        .execute(&mut *con)
        .await
        .convert_error()?;
        let user_id = result.last_insert_rowid();
        for book in user.read_books() {
            SqliteReadingListInternal::create(&mut *con, user_id, book.id()).await?;
        }
        Ok(())
    }

    async fn find_row_by_name(
        con: &mut SqliteConnection,
        user_name: &UserName,
    ) -> error_stack::Result<Option<UserRow>, KernelError> {
        let rows = sqlx::query_as::<_, UserRow>(
            // language=sqlite
            r#"
            SELECT id, user_name, password
            FROM users
            WHERE user_name = ?
            "#,
        )
        .bind(user_name.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        single(rows, || format!("user {}", user_name))
    }

    pub(in crate::database) async fn find_id_by_name(
        con: &mut SqliteConnection,
        user_name: &UserName,
    ) -> error_stack::Result<Option<i64>, KernelError> {
        let row = Self::find_row_by_name(con, user_name).await?;
        Ok(row.map(|row| row.id))
    }

    /// Replays the reading list so the page counter matches the stored books.
    async fn find_by_name(
        con: &mut SqliteConnection,
        user_name: &UserName,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let Some(row) = Self::find_row_by_name(&mut *con, user_name).await? else {
            return Ok(None);
        };
        let mut user = User::with_password(
            UserName::new(row.user_name)?,
            row.password.map(UserPassword::from_digest),
        );
        for book in SqliteBookInternal::find_read_by_user(&mut *con, row.id).await? {
            user.read_a_book(&book);
        }
        for review in SqliteReviewInternal::find_for_user(&mut *con, row.id).await? {
            user.add_review(review);
        }
        Ok(Some(user))
    }
}
