use crate::entity::{Publisher, PublisherName};
use crate::KernelError;

#[async_trait::async_trait]
pub trait PublisherRepository: 'static + Sync + Send {
    async fn add_publisher(&self, publisher: &Publisher) -> error_stack::Result<(), KernelError>;
    async fn get_publisher(
        &self,
        name: &PublisherName,
    ) -> error_stack::Result<Option<Publisher>, KernelError>;
    async fn get_publishers(&self) -> error_stack::Result<Vec<Publisher>, KernelError>;
}
