mod name;

pub use self::name::*;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use vodca::References;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, References)]
pub struct Publisher {
    name: PublisherName,
}

impl Publisher {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: PublisherName::new(name),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = PublisherName::new(name);
    }
}

impl Display for Publisher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Publisher {}>", self.name)
    }
}
