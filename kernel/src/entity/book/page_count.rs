use serde::Serialize;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Fromln, AsRefln)]
pub struct PageCount(i64);

impl PageCount {
    /// Non-positive counts are not rejected, they mean "unknown".
    pub fn new(pages: impl Into<i64>) -> Option<Self> {
        let pages = pages.into();
        (pages > 0).then_some(Self(pages))
    }
}
