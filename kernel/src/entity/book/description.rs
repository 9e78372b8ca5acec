use serde::Serialize;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Fromln, AsRefln)]
pub struct BookDescription(String);

impl BookDescription {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into().trim().to_string())
    }
}
