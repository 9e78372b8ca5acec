use crate::entity::{Book, User};
use crate::KernelError;

/// Both calls persist the association and update `user` in place, so the
/// caller's copy matches what a later `get_user` returns.
#[async_trait::async_trait]
pub trait ReadingListRepository: 'static + Sync + Send {
    async fn add_to_reading_list(
        &self,
        user: &mut User,
        book: &Book,
    ) -> error_stack::Result<(), KernelError>;
    async fn remove_from_reading_list(
        &self,
        user: &mut User,
        book: &Book,
    ) -> error_stack::Result<(), KernelError>;
}
