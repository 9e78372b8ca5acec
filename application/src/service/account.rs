use error_stack::Report;

use kernel::interface::repository::{DependOnRepository, UserRepository};
use kernel::prelude::entity::{User, UserName};

use crate::error::{ApplicationError, ConvertError};
use crate::transfer::{RegisterUserDto, UserDto};

#[async_trait::async_trait]
pub trait AccountService: 'static + Sync + Send + DependOnRepository {
    async fn register(
        &self,
        dto: RegisterUserDto,
    ) -> error_stack::Result<UserDto, ApplicationError> {
        let user_name = UserName::new(dto.user_name).convert_error()?;
        if dto.password.is_empty() {
            return Err(Report::new(ApplicationError::InvalidInput)
                .attach_printable("password must not be empty"));
        }
        let existing = UserRepository::get_user(self.repository(), &user_name)
            .await
            .convert_error()?;
        if existing.is_some() {
            return Err(Report::new(ApplicationError::UserNameTaken)
                .attach_printable(format!("{user_name} is already registered")));
        }
        let user = User::new(user_name, &dto.password);
        self.repository().add_user(&user).await.convert_error()?;
        tracing::info!("registered {}", user.user_name());
        Ok(UserDto::from(user))
    }

    /// Unknown names and wrong passwords are indistinguishable to the caller.
    async fn authenticate(
        &self,
        user_name: &str,
        password: &str,
    ) -> error_stack::Result<UserDto, ApplicationError> {
        let invalid = || Report::new(ApplicationError::InvalidCredentials);
        let user_name = UserName::new(user_name).map_err(|_| invalid())?;
        let user = UserRepository::get_user(self.repository(), &user_name)
            .await
            .convert_error()?
            .ok_or_else(invalid)?;
        if !user.verify_password(password) {
            tracing::debug!("rejected password for {}", user_name);
            return Err(invalid());
        }
        Ok(UserDto::from(user))
    }

    async fn get_user(
        &self,
        user_name: &str,
    ) -> error_stack::Result<Option<UserDto>, ApplicationError> {
        let user_name = UserName::new(user_name).convert_error()?;
        let user = UserRepository::get_user(self.repository(), &user_name)
            .await
            .convert_error()?;
        Ok(user.map(UserDto::from))
    }
}

impl<T> AccountService for T where T: DependOnRepository {}
