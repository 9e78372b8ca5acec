use crate::entity::{Book, BookId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookRepository: 'static + Sync + Send {
    async fn add_book(&self, book: &Book) -> error_stack::Result<(), KernelError>;
    async fn get_book(&self, id: &BookId) -> error_stack::Result<Option<Book>, KernelError>;
    /// All books, ascending by id.
    async fn get_books(&self) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn get_number_of_books(&self) -> error_stack::Result<usize, KernelError>;
}
