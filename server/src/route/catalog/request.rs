use serde::Deserialize;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    keyword: String,
}

pub struct SearchTransformer;

impl Intake<SearchRequest> for SearchTransformer {
    type To = String;
    fn emit(&self, input: SearchRequest) -> Self::To {
        input.keyword
    }
}
