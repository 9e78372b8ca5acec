use serde::Serialize;
use time::OffsetDateTime;

use kernel::prelude::entity::{DestructReview, DestructReviewBucket, Review, ReviewBucket};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewDto {
    pub book_id: Option<i64>,
    pub review_text: String,
    pub rating: i64,
    pub user_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl From<Review> for ReviewDto {
    fn from(value: Review) -> Self {
        let DestructReview {
            book_id,
            review_text,
            rating,
            user_name,
            timestamp,
        } = value.into_destruct();
        Self {
            book_id: book_id.map(i64::from),
            review_text: review_text.into(),
            rating: rating.into(),
            user_name: user_name.map(String::from),
            timestamp: *timestamp.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewBucketDto {
    pub book_id: i64,
    pub reviews: Vec<ReviewDto>,
}

impl From<ReviewBucket> for ReviewBucketDto {
    fn from(value: ReviewBucket) -> Self {
        let DestructReviewBucket { book_id, reviews } = value.into_destruct();
        Self {
            book_id: book_id.into(),
            reviews: reviews.into_iter().map(ReviewDto::from).collect(),
        }
    }
}

pub struct CreateReviewDto {
    pub book_id: i64,
    pub review_text: String,
    pub rating: i64,
    pub user_name: String,
}
