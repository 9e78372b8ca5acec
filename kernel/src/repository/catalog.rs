use crate::browse::{self, BooksByYear};
use crate::entity::{Author, AuthorName, Book, Publisher, ReleaseYear};
use crate::KernelError;

/// Cross-cutting lookups and orderings over the catalog.
///
/// Every `order_*` call returns a fresh list; stored order is never touched.
#[async_trait::async_trait]
pub trait CatalogQuery: 'static + Sync + Send {
    /// Books listing `author_name` among their authors, ascending by book id.
    async fn get_books_for_author(
        &self,
        author_name: &AuthorName,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn order_books_by_title(&self) -> error_stack::Result<Vec<Book>, KernelError>;
    /// Newest first; books without a release year are left out.
    async fn order_books_by_year(&self) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn order_authors_by_name(&self) -> error_stack::Result<Vec<Author>, KernelError>;
    async fn order_publishers_by_name(&self) -> error_stack::Result<Vec<Publisher>, KernelError>;

    fn year_of_previous_book(
        &self,
        grouped: &BooksByYear,
        current: &ReleaseYear,
    ) -> Option<ReleaseYear> {
        browse::year_of_previous_book(grouped, current)
    }

    fn year_of_next_book(&self, grouped: &BooksByYear, current: &ReleaseYear) -> Option<ReleaseYear> {
        browse::year_of_next_book(grouped, current)
    }
}
