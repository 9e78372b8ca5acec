use error_stack::Report;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Fromln, AsRefln)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn new(title: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(
                Report::new(KernelError::Validation).attach_printable("book title must not be blank")
            );
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Display for BookTitle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
