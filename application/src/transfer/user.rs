use serde::Serialize;

use kernel::prelude::entity::{DestructUser, User};

use crate::transfer::{BookDto, ReviewDto};

/// Never carries the password digest.
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub user_name: String,
    pub read_books: Vec<BookDto>,
    pub pages_read: i64,
    pub reviews: Vec<ReviewDto>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            user_name,
            read_books,
            pages_read,
            reviews,
            ..
        } = value.into_destruct();
        Self {
            user_name: user_name.into(),
            read_books: read_books.into_iter().map(BookDto::from).collect(),
            pages_read,
            reviews: reviews.into_iter().map(ReviewDto::from).collect(),
        }
    }
}

pub struct RegisterUserDto {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadingListDto {
    pub user_name: String,
    pub books: Vec<BookDto>,
    pub pages_read: i64,
}

impl From<User> for ReadingListDto {
    fn from(value: User) -> Self {
        let DestructUser {
            user_name,
            read_books,
            pages_read,
            ..
        } = value.into_destruct();
        Self {
            user_name: user_name.into(),
            books: read_books.into_iter().map(BookDto::from).collect(),
            pages_read,
        }
    }
}
