use serde::Serialize;
use vodca::{AsRefln, Fromln};

const BLANK_REVIEW: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Fromln, AsRefln)]
pub struct ReviewText(String);

impl ReviewText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        match text.trim() {
            "" => Self(BLANK_REVIEW.to_string()),
            trimmed => Self(trimmed.to_string()),
        }
    }
}
