use crate::entity::{User, UserName};
use crate::KernelError;

#[async_trait::async_trait]
pub trait UserRepository: 'static + Sync + Send {
    async fn add_user(&self, user: &User) -> error_stack::Result<(), KernelError>;
    async fn get_user(&self, user_name: &UserName)
        -> error_stack::Result<Option<User>, KernelError>;
}
