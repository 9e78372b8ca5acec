use std::collections::HashMap;

use sqlx::SqliteConnection;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::repository::ReviewRepository;
use kernel::prelude::entity::{
    BookId, CreatedAt, Rating, Review, ReviewBucket, ReviewText, UserName,
};
use kernel::KernelError;

use crate::database::sqlite::book::SqliteBookInternal;
use crate::database::SqliteRepository;
use crate::error::ConvertError;

#[async_trait::async_trait]
impl ReviewRepository for SqliteRepository {
    async fn create_review(&self, book_id: &BookId) -> error_stack::Result<(), KernelError> {
        // Buckets are derived from the books table when reviews are read.
        tracing::trace!("review bucket for book {} needs no row", book_id);
        Ok(())
    }

    async fn add_review(
        &self,
        book_id: &BookId,
        review: &Review,
    ) -> error_stack::Result<(), KernelError> {
        let mut con = self.db.transact().await?;
        SqliteReviewInternal::create(&mut con, book_id, review).await?;
        con.commit().await?;
        tracing::debug!("stored {}", review);
        Ok(())
    }

    async fn get_reviews(&self) -> error_stack::Result<Vec<ReviewBucket>, KernelError> {
        let mut con = self.db.transact().await?;
        let ids = SqliteBookInternal::find_ids(&mut con).await?;
        let mut buckets = ids.into_iter().map(ReviewBucket::new).collect::<Vec<_>>();
        let index = buckets
            .iter()
            .enumerate()
            .map(|(position, bucket)| (*bucket.book_id(), position))
            .collect::<HashMap<_, _>>();
        for (book_id, review) in SqliteReviewInternal::find_all(&mut con).await? {
            if let Some(position) = index.get(&book_id) {
                buckets[*position].add_review(review);
            }
        }
        Ok(buckets)
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    book_id: i64,
    review_text: String,
    rating: i64,
    user_name: Option<String>,
    timestamp: String,
}

impl ReviewRow {
    fn into_review(self) -> error_stack::Result<(BookId, Review), KernelError> {
        let book_id = BookId::new(self.book_id)?;
        let timestamp = OffsetDateTime::parse(&self.timestamp, &Rfc3339).convert_error()?;
        let review = Review::new(
            Some(book_id),
            ReviewText::new(self.review_text),
            Rating::new(self.rating)?,
            self.user_name.map(UserName::new).transpose()?,
            CreatedAt::new(timestamp),
        );
        Ok((book_id, review))
    }
}

pub(in crate::database) struct SqliteReviewInternal;

impl SqliteReviewInternal {
    async fn create(
        con: &mut SqliteConnection,
        book_id: &BookId,
        review: &Review,
    ) -> error_stack::Result<(), KernelError> {
        let timestamp = review.timestamp().as_ref().format(&Rfc3339).convert_error()?;
        // language=sqlite
        sqlx::query(
            r#"
            INSERT INTO reviews (user_id, book_id, review_text, rating, timestamp)
            VALUES ((SELECT id FROM users WHERE user_name = ?), ?, ?, ?, ?)
            "#,
        )
        .bind(review.user_name().as_ref().map(AsRef::<String>::as_ref))
        .bind(*book_id.as_ref())
        .bind(review.review_text().as_ref())
        .bind(*review.rating().as_ref())
        .bind(timestamp)
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn find_all(
        con: &mut SqliteConnection,
    ) -> error_stack::Result<Vec<(BookId, Review)>, KernelError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            // language=sqlite
            r#"
            SELECT r.book_id, r.review_text, r.rating, u.user_name, r.timestamp
            FROM reviews r
            LEFT JOIN users u ON u.id = r.user_id
            ORDER BY r.id ASC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(ReviewRow::into_review).collect()
    }

    pub(in crate::database) async fn find_for_book(
        con: &mut SqliteConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            // language=sqlite
            r#"
            SELECT r.book_id, r.review_text, r.rating, u.user_name, r.timestamp
            FROM reviews r
            LEFT JOIN users u ON u.id = r.user_id
            WHERE r.book_id = ?
            ORDER BY r.id ASC
            "#,
        )
        .bind(*book_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter()
            .map(|row| row.into_review().map(|(_, review)| review))
            .collect()
    }

    pub(in crate::database) async fn find_for_user(
        con: &mut SqliteConnection,
        user_id: i64,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            // language=sqlite
            r#"
            SELECT r.book_id, r.review_text, r.rating, u.user_name, r.timestamp
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.user_id = ?
            ORDER BY r.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter()
            .map(|row| row.into_review().map(|(_, review)| review))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use kernel::interface::repository::{BookRepository, ReviewRepository, UserRepository};
    use kernel::prelude::entity::{
        Book, BookId, CreatedAt, Rating, Review, ReviewText, User, UserName,
    };
    use kernel::KernelError;

    use crate::database::{SqliteDatabase, SqliteRepository};

    #[tokio::test]
    async fn reviews_are_grouped_per_book() -> error_stack::Result<(), KernelError> {
        let repository = SqliteRepository::new(SqliteDatabase::in_memory().await?);
        let first = Book::from_raw(1, "First")?;
        let second = Book::from_raw(2, "Second")?;
        repository.add_book(&second).await?;
        repository.add_book(&first).await?;
        repository.add_user(&User::new(UserName::new("thorke")?, "pw")).await?;

        let review = Review::new(
            Some(BookId::new(2)?),
            ReviewText::new("Loved it"),
            Rating::new(5)?,
            Some(UserName::new("thorke")?),
            CreatedAt::new(datetime!(2020-02-28 14:31:26 UTC)),
        );
        repository.create_review(second.id()).await?;
        repository.add_review(second.id(), &review).await?;

        let buckets = repository.get_reviews().await?;
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].book_id(), first.id());
        assert!(buckets[0].reviews().is_empty());
        assert_eq!(buckets[1].book_id(), second.id());
        assert_eq!(buckets[1].reviews(), &vec![review.clone()]);

        let stored = repository
            .get_book(second.id())
            .await?
            .expect("book was stored");
        assert_eq!(stored.reviews(), &vec![review.clone()]);
        let user = repository
            .get_user(&UserName::new("thorke")?)
            .await?
            .expect("user was stored");
        assert_eq!(user.reviews(), &vec![review]);
        Ok(())
    }

    #[tokio::test]
    async fn review_of_unknown_book_fails() -> error_stack::Result<(), KernelError> {
        let repository = SqliteRepository::new(SqliteDatabase::in_memory().await?);
        let review = Review::new(
            None,
            ReviewText::new("Lost"),
            Rating::new(1)?,
            None,
            CreatedAt::new(datetime!(2020-03-01 10:00:00 UTC)),
        );
        let error = repository
            .add_review(&BookId::new(99)?, &review)
            .await
            .expect_err("book 99 does not exist");
        assert_eq!(error.current_context(), &KernelError::Persistence);
        Ok(())
    }
}
