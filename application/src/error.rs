use std::fmt::{Display, Formatter};

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ApplicationError {
    UnknownBook,
    UnknownUser,
    /// A request value failed entity validation.
    InvalidInput,
    UserNameTaken,
    InvalidCredentials,
    /// The repository failed; the report carries the `KernelError` below.
    Repository,
}

impl Display for ApplicationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationError::UnknownBook => write!(f, "Unknown book"),
            ApplicationError::UnknownUser => write!(f, "Unknown user"),
            ApplicationError::InvalidInput => write!(f, "Invalid input"),
            ApplicationError::UserNameTaken => write!(f, "Your user name is already taken"),
            ApplicationError::InvalidCredentials => write!(f, "User name or password is wrong"),
            ApplicationError::Repository => write!(f, "Repository error"),
        }
    }
}

impl Context for ApplicationError {}

/// Lifts repository reports into the service error, keeping the kernel report as the source.
pub(crate) trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, ApplicationError>;
}

impl<T> ConvertError for error_stack::Result<T, kernel::KernelError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, ApplicationError> {
        self.map_err(|report| {
            let context = match report.current_context() {
                kernel::KernelError::Validation => ApplicationError::InvalidInput,
                _ => ApplicationError::Repository,
            };
            report.change_context(context)
        })
    }
}
