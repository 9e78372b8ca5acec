use error_stack::Report;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

const RATING_RANGE: RangeInclusive<i64> = 1..=5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Fromln, AsRefln)]
pub struct Rating(i64);

impl Rating {
    pub fn new(rating: impl Into<i64>) -> error_stack::Result<Self, KernelError> {
        let rating = rating.into();
        if !RATING_RANGE.contains(&rating) {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("rating must be within 1..=5, got {rating}")));
        }
        Ok(Self(rating))
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
