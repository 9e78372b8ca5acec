use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use application::transfer::{ReadingListDto, RecommendationDto, UserDto};

use crate::controller::Exhaust;

#[derive(Debug)]
pub struct CreatedUserResponse(UserDto);

impl IntoResponse for CreatedUserResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

pub struct UserPresenter;

impl Exhaust<UserDto> for UserPresenter {
    type To = CreatedUserResponse;
    fn emit(&self, input: UserDto) -> Self::To {
        CreatedUserResponse(input)
    }
}

impl Exhaust<Option<UserDto>> for UserPresenter {
    type To = Option<Json<UserDto>>;
    fn emit(&self, input: Option<UserDto>) -> Self::To {
        input.map(Json)
    }
}

/// Sign-in answers with the account itself.
pub struct SessionPresenter;

impl Exhaust<UserDto> for SessionPresenter {
    type To = Json<UserDto>;
    fn emit(&self, input: UserDto) -> Self::To {
        Json(input)
    }
}

pub struct ReadingListPresenter;

impl Exhaust<ReadingListDto> for ReadingListPresenter {
    type To = Json<ReadingListDto>;
    fn emit(&self, input: ReadingListDto) -> Self::To {
        Json(input)
    }
}

impl Exhaust<Vec<RecommendationDto>> for ReadingListPresenter {
    type To = Json<Vec<RecommendationDto>>;
    fn emit(&self, input: Vec<RecommendationDto>) -> Self::To {
        Json(input)
    }
}
