use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    /// A value was rejected while constructing or updating an entity.
    Validation,
    /// A lookup that must match at most one row matched several.
    Uniqueness,
    Timeout,
    Persistence,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Validation error"),
            KernelError::Uniqueness => write!(f, "Uniqueness invariant violated"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Persistence => write!(f, "Persistence error"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
