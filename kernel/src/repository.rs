mod author;
mod book;
mod catalog;
mod publisher;
mod reading_list;
mod review;
mod user;

pub use self::{
    author::*, book::*, catalog::*, publisher::*, reading_list::*, review::*, user::*,
};

/// Everything the rest of the application may ask of a storage backend.
pub trait Repository:
    UserRepository
    + AuthorRepository
    + BookRepository
    + PublisherRepository
    + CatalogQuery
    + ReviewRepository
    + ReadingListRepository
{
}

impl<T> Repository for T where
    T: UserRepository
        + AuthorRepository
        + BookRepository
        + PublisherRepository
        + CatalogQuery
        + ReviewRepository
        + ReadingListRepository
{
}

pub trait DependOnRepository: 'static + Sync + Send {
    type Repository: Repository + ?Sized;
    fn repository(&self) -> &Self::Repository;
}

impl<T> DependOnRepository for T
where
    T: Repository,
{
    type Repository = T;
    fn repository(&self) -> &Self::Repository {
        self
    }
}
