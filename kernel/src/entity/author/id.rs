use error_stack::Report;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Fromln, AsRefln)]
pub struct AuthorId(i64);

impl AuthorId {
    pub fn new(id: impl Into<i64>) -> error_stack::Result<Self, KernelError> {
        let id = id.into();
        if id < 0 {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("author id must be non-negative, got {id}")));
        }
        Ok(Self(id))
    }
}

impl Display for AuthorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
