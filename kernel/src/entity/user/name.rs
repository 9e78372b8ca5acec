use error_stack::Report;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// Compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Fromln, AsRefln, Serialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(
                Report::new(KernelError::Validation).attach_printable("user name must not be blank")
            );
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Display for UserName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
