use serde::Deserialize;

use application::transfer::CreateReviewDto;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    user_name: String,
    review_text: String,
    rating: i64,
}

pub struct ReviewTransformer;

impl Intake<(i64, CreateReviewRequest)> for ReviewTransformer {
    type To = CreateReviewDto;
    fn emit(&self, input: (i64, CreateReviewRequest)) -> Self::To {
        let (book_id, input) = input;
        CreateReviewDto {
            book_id,
            review_text: input.review_text,
            rating: input.rating,
            user_name: input.user_name,
        }
    }
}
