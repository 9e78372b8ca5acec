use error_stack::Report;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Fromln, AsRefln)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("author name must not be blank"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Display for AuthorName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
