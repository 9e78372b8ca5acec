use serde::Deserialize;

use application::transfer::RegisterUserDto;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    user_name: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    user_name: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct AddToReadingListRequest {
    book_id: i64,
}

pub struct UserTransformer;

impl Intake<RegisterUserRequest> for UserTransformer {
    type To = RegisterUserDto;
    fn emit(&self, input: RegisterUserRequest) -> Self::To {
        RegisterUserDto {
            user_name: input.user_name,
            password: input.password,
        }
    }
}

impl Intake<SignInRequest> for UserTransformer {
    type To = (String, String);
    fn emit(&self, input: SignInRequest) -> Self::To {
        (input.user_name, input.password)
    }
}

impl Intake<AddToReadingListRequest> for UserTransformer {
    type To = i64;
    fn emit(&self, input: AddToReadingListRequest) -> Self::To {
        input.book_id
    }
}
