use error_stack::Report;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Fromln, AsRefln)]
pub struct ReleaseYear(i32);

impl ReleaseYear {
    pub fn new(year: impl Into<i32>) -> error_stack::Result<Self, KernelError> {
        let year = year.into();
        if year <= 0 {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("release year must be positive, got {year}")));
        }
        Ok(Self(year))
    }
}

impl Display for ReleaseYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
