use crate::entity::{BookId, Review, ReviewBucket};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReviewRepository: 'static + Sync + Send {
    /// Opens an empty bucket for `book_id`. Reviews for a book without a
    /// bucket are dropped by the in-memory backend.
    async fn create_review(&self, book_id: &BookId) -> error_stack::Result<(), KernelError>;
    async fn add_review(
        &self,
        book_id: &BookId,
        review: &Review,
    ) -> error_stack::Result<(), KernelError>;
    async fn get_reviews(&self) -> error_stack::Result<Vec<ReviewBucket>, KernelError>;
}
