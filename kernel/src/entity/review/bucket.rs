use destructure::Destructure;
use vodca::References;

use crate::entity::{BookId, Review};

/// Reviews accumulated for one book.
#[derive(Debug, Clone, PartialEq, Eq, References, Destructure)]
pub struct ReviewBucket {
    book_id: BookId,
    reviews: Vec<Review>,
}

impl ReviewBucket {
    pub fn new(book_id: BookId) -> Self {
        Self {
            book_id,
            reviews: Vec::new(),
        }
    }

    pub fn add_review(&mut self, review: Review) {
        self.reviews.push(review);
    }
}
