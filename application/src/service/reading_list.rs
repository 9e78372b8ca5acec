use std::collections::HashSet;

use error_stack::Report;

use kernel::interface::repository::{
    BookRepository, CatalogQuery, DependOnRepository, ReadingListRepository, UserRepository,
};
use kernel::prelude::entity::{Author, Book, BookId, User, UserName};

use crate::error::{ApplicationError, ConvertError};
use crate::transfer::{BookDto, ReadingListDto, RecommendationDto};

#[async_trait::async_trait]
pub trait ReadingListService: 'static + Sync + Send + DependOnRepository {
    async fn add_to_reading_list(
        &self,
        user_name: &str,
        book_id: i64,
    ) -> error_stack::Result<ReadingListDto, ApplicationError> {
        let mut user = find_user(self.repository(), user_name).await?;
        let book = find_book(self.repository(), book_id).await?;
        ReadingListRepository::add_to_reading_list(self.repository(), &mut user, &book)
            .await
            .convert_error()?;
        Ok(ReadingListDto::from(user))
    }

    async fn remove_from_reading_list(
        &self,
        user_name: &str,
        book_id: i64,
    ) -> error_stack::Result<ReadingListDto, ApplicationError> {
        let mut user = find_user(self.repository(), user_name).await?;
        let book = find_book(self.repository(), book_id).await?;
        ReadingListRepository::remove_from_reading_list(self.repository(), &mut user, &book)
            .await
            .convert_error()?;
        Ok(ReadingListDto::from(user))
    }

    async fn reading_list_for_user(
        &self,
        user_name: &str,
    ) -> error_stack::Result<ReadingListDto, ApplicationError> {
        let user = find_user(self.repository(), user_name).await?;
        Ok(ReadingListDto::from(user))
    }

    /// For every author on the reading list, the rest of their books.
    /// Authors keep the order in which they first appear on the list.
    async fn recommended_books(
        &self,
        user_name: &str,
    ) -> error_stack::Result<Vec<RecommendationDto>, ApplicationError> {
        let user = find_user(self.repository(), user_name).await?;
        let read = user
            .read_books()
            .iter()
            .map(|book| *book.id())
            .collect::<HashSet<_>>();

        let mut authors: Vec<&Author> = Vec::new();
        for author in user.read_books().iter().flat_map(|book| book.authors()) {
            if !authors.contains(&author) {
                authors.push(author);
            }
        }

        let mut recommendations = Vec::with_capacity(authors.len());
        for author in authors {
            let books = self
                .repository()
                .get_books_for_author(author.full_name())
                .await
                .convert_error()?;
            recommendations.push(RecommendationDto {
                author: author.full_name().to_string(),
                books: books
                    .into_iter()
                    .filter(|book| !read.contains(book.id()))
                    .map(BookDto::from)
                    .collect(),
            });
        }
        Ok(recommendations)
    }
}

impl<T> ReadingListService for T where T: DependOnRepository {}

async fn find_user<R>(
    repository: &R,
    user_name: &str,
) -> error_stack::Result<User, ApplicationError>
where
    R: UserRepository + ?Sized,
{
    let user_name = UserName::new(user_name).convert_error()?;
    repository
        .get_user(&user_name)
        .await
        .convert_error()?
        .ok_or_else(|| {
            Report::new(ApplicationError::UnknownUser)
                .attach_printable(format!("no user named {user_name}"))
        })
}

async fn find_book<R>(repository: &R, book_id: i64) -> error_stack::Result<Book, ApplicationError>
where
    R: BookRepository + ?Sized,
{
    let book_id = BookId::new(book_id).convert_error()?;
    repository
        .get_book(&book_id)
        .await
        .convert_error()?
        .ok_or_else(|| {
            Report::new(ApplicationError::UnknownBook)
                .attach_printable(format!("no book with id {book_id}"))
        })
}
