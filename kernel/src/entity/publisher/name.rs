use serde::Serialize;
use std::fmt::{Display, Formatter};
use vodca::{AsRefln, Fromln};

/// Stands in for a blank publisher name.
pub const UNKNOWN_PUBLISHER: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Fromln, AsRefln)]
pub struct PublisherName(String);

impl PublisherName {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.trim() {
            "" => Self(UNKNOWN_PUBLISHER.to_string()),
            trimmed => Self(trimmed.to_string()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_PUBLISHER
    }
}

impl Display for PublisherName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
