use error_stack::Report;

use kernel::interface::repository::{
    BookRepository, DependOnRepository, ReviewRepository, UserRepository,
};
use kernel::prelude::entity::{BookId, Rating, Review, ReviewText, UserName};

use crate::error::{ApplicationError, ConvertError};
use crate::transfer::{CreateReviewDto, ReviewBucketDto, ReviewDto};

#[async_trait::async_trait]
pub trait ReviewService: 'static + Sync + Send + DependOnRepository {
    /// Records a review written now by a registered user.
    async fn add_review(
        &self,
        dto: CreateReviewDto,
    ) -> error_stack::Result<ReviewDto, ApplicationError> {
        let book_id = BookId::new(dto.book_id).convert_error()?;
        let user_name = UserName::new(dto.user_name).convert_error()?;
        let rating = Rating::new(dto.rating).convert_error()?;

        let Some(book) = self.repository().get_book(&book_id).await.convert_error()? else {
            return Err(Report::new(ApplicationError::UnknownBook)
                .attach_printable(format!("no book with id {book_id}")));
        };
        let Some(user) = self.repository().get_user(&user_name).await.convert_error()? else {
            return Err(Report::new(ApplicationError::UnknownUser)
                .attach_printable(format!("no user named {user_name}")));
        };

        let review = Review::of(
            Some(&book),
            ReviewText::new(dto.review_text),
            rating,
            Some(&user),
        );
        ReviewRepository::add_review(self.repository(), &book_id, &review)
            .await
            .convert_error()?;
        tracing::info!("{} reviewed book {}", user_name, book_id);
        Ok(ReviewDto::from(review))
    }

    async fn get_reviews(&self) -> error_stack::Result<Vec<ReviewBucketDto>, ApplicationError> {
        let buckets = ReviewRepository::get_reviews(self.repository())
            .await
            .convert_error()?;
        Ok(buckets.into_iter().map(ReviewBucketDto::from).collect())
    }
}

impl<T> ReviewService for T where T: DependOnRepository {}
