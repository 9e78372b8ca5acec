use crate::entity::{Author, AuthorId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait AuthorRepository: 'static + Sync + Send {
    async fn add_author(&self, author: &Author) -> error_stack::Result<(), KernelError>;
    async fn get_author(&self, id: &AuthorId)
        -> error_stack::Result<Option<Author>, KernelError>;
    async fn get_authors(&self) -> error_stack::Result<Vec<Author>, KernelError>;
}
