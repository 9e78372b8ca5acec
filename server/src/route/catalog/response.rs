use axum::Json;

use application::transfer::{AuthorDto, BookDto, PublisherDto};

use crate::controller::Exhaust;

pub struct CatalogPresenter;

impl Exhaust<Vec<AuthorDto>> for CatalogPresenter {
    type To = Json<Vec<AuthorDto>>;
    fn emit(&self, input: Vec<AuthorDto>) -> Self::To {
        Json(input)
    }
}

impl Exhaust<Vec<PublisherDto>> for CatalogPresenter {
    type To = Json<Vec<PublisherDto>>;
    fn emit(&self, input: Vec<PublisherDto>) -> Self::To {
        Json(input)
    }
}

impl Exhaust<Vec<BookDto>> for CatalogPresenter {
    type To = Json<Vec<BookDto>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        Json(input)
    }
}
