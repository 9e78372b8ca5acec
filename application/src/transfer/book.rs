use serde::Serialize;

use kernel::prelude::entity::{
    Author, Book, DestructAuthor, DestructBook, Publisher, ReleaseYear,
};

use crate::transfer::ReviewDto;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorDto {
    pub id: i64,
    pub full_name: String,
}

impl From<Author> for AuthorDto {
    fn from(value: Author) -> Self {
        let DestructAuthor { id, full_name, .. } = value.into_destruct();
        Self {
            id: id.into(),
            full_name: full_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublisherDto {
    pub name: String,
}

impl From<Publisher> for PublisherDto {
    fn from(value: Publisher) -> Self {
        Self {
            name: value.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub authors: Vec<AuthorDto>,
    pub release_year: Option<i32>,
    pub num_pages: Option<i64>,
    pub ebook: bool,
    pub reviews: Vec<ReviewDto>,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            description,
            publisher,
            authors,
            release_year,
            num_pages,
            ebook,
            reviews,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            description: description.map(String::from),
            publisher: publisher.map(|publisher| publisher.name().to_string()),
            authors: authors.into_iter().map(AuthorDto::from).collect(),
            release_year: release_year.map(i32::from),
            num_pages: num_pages.map(i64::from),
            ebook,
            reviews: reviews.into_iter().map(ReviewDto::from).collect(),
        }
    }
}

/// One page of the year browser.
#[derive(Debug, Clone, Serialize)]
pub struct BooksByYearDto {
    pub year: i32,
    pub books: Vec<BookDto>,
    pub previous_year: Option<i32>,
    pub next_year: Option<i32>,
}

impl BooksByYearDto {
    pub fn new(
        year: ReleaseYear,
        books: Vec<Book>,
        previous_year: Option<ReleaseYear>,
        next_year: Option<ReleaseYear>,
    ) -> Self {
        Self {
            year: year.into(),
            books: books.into_iter().map(BookDto::from).collect(),
            previous_year: previous_year.map(i32::from),
            next_year: next_year.map(i32::from),
        }
    }
}

/// Other books by an author the reader already knows.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationDto {
    pub author: String,
    pub books: Vec<BookDto>,
}
