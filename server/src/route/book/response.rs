use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use application::transfer::{BookDto, BooksByYearDto, ReviewBucketDto, ReviewDto};

use crate::controller::Exhaust;

#[derive(Debug)]
pub struct CreatedReviewResponse(ReviewDto);

impl IntoResponse for CreatedReviewResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = Json<Vec<BookDto>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        Json(input)
    }
}

impl Exhaust<Option<BookDto>> for BookPresenter {
    type To = Option<Json<BookDto>>;
    fn emit(&self, input: Option<BookDto>) -> Self::To {
        input.map(Json)
    }
}

impl Exhaust<Option<BooksByYearDto>> for BookPresenter {
    type To = Option<Json<BooksByYearDto>>;
    fn emit(&self, input: Option<BooksByYearDto>) -> Self::To {
        input.map(Json)
    }
}

pub struct ReviewPresenter;

impl Exhaust<ReviewDto> for ReviewPresenter {
    type To = CreatedReviewResponse;
    fn emit(&self, input: ReviewDto) -> Self::To {
        CreatedReviewResponse(input)
    }
}

impl Exhaust<Vec<ReviewBucketDto>> for ReviewPresenter {
    type To = Json<Vec<ReviewBucketDto>>;
    fn emit(&self, input: Vec<ReviewBucketDto>) -> Self::To {
        Json(input)
    }
}
