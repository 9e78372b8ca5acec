mod bucket;
mod rating;
mod text;

pub use self::{bucket::*, rating::*, text::*};
use std::fmt::{Display, Formatter};

use destructure::Destructure;
use vodca::References;

use crate::entity::{Book, BookId, CreatedAt, User, UserName};

#[derive(Debug, Clone, PartialEq, Eq, References, Destructure)]
pub struct Review {
    book_id: Option<BookId>,
    review_text: ReviewText,
    rating: Rating,
    user_name: Option<UserName>,
    timestamp: CreatedAt<Review>,
}

impl Review {
    pub fn new(
        book_id: Option<BookId>,
        review_text: ReviewText,
        rating: Rating,
        user_name: Option<UserName>,
        timestamp: CreatedAt<Review>,
    ) -> Self {
        Self {
            book_id,
            review_text,
            rating,
            user_name,
            timestamp,
        }
    }

    /// Written now. A missing book or user leaves the reference empty instead of failing.
    pub fn of(
        book: Option<&Book>,
        review_text: ReviewText,
        rating: Rating,
        user: Option<&User>,
    ) -> Self {
        Self::new(
            book.map(|book| *book.id()),
            review_text,
            rating,
            user.map(|user| user.user_name().clone()),
            CreatedAt::now(),
        )
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.book_id {
            Some(book_id) => write!(f, "<Review of book {book_id}")?,
            None => write!(f, "<Review of book N/A")?,
        }
        write!(
            f,
            ", rating = {}, timestamp = {}>",
            self.rating,
            self.timestamp.as_ref()
        )
    }
}
