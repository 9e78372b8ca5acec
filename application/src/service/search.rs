use std::collections::HashSet;

use kernel::interface::browse::group_books_by_year;
use kernel::interface::repository::{BookRepository, CatalogQuery, DependOnRepository};
use kernel::prelude::entity::Book;

use crate::error::{ApplicationError, ConvertError};
use crate::transfer::BookDto;

#[async_trait::async_trait]
pub trait SearchService: 'static + Sync + Send + DependOnRepository {
    /// Matches `keyword` case-insensitively against titles, author names and
    /// publisher names, and exactly against release years. Each book appears
    /// once, in the order it was first matched.
    async fn search_books(
        &self,
        keyword: &str,
    ) -> error_stack::Result<Vec<BookDto>, ApplicationError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }
        let needle = keyword.to_lowercase();
        let books = self.repository().get_books().await.convert_error()?;
        let mut found = Vec::new();

        found.extend(
            books
                .iter()
                .filter(|book| book.title().to_string().to_lowercase().contains(&needle))
                .cloned(),
        );

        let authors = self.repository().order_authors_by_name().await.convert_error()?;
        for author in authors {
            if author.full_name().to_string().to_lowercase().contains(&needle) {
                found.extend(
                    self.repository()
                        .get_books_for_author(author.full_name())
                        .await
                        .convert_error()?,
                );
            }
        }

        let publishers = self
            .repository()
            .order_publishers_by_name()
            .await
            .convert_error()?;
        for publisher in publishers {
            if publisher.name().to_string().to_lowercase().contains(&needle) {
                found.extend(
                    books
                        .iter()
                        .filter(|book| book.publisher().as_ref() == Some(&publisher))
                        .cloned(),
                );
            }
        }

        let dated = self.repository().order_books_by_year().await.convert_error()?;
        for (year, books) in group_books_by_year(dated) {
            if year.to_string() == keyword {
                found.extend(books);
            }
        }

        tracing::debug!("search for {:?} matched {} entries", keyword, found.len());
        Ok(distinct(found).into_iter().map(BookDto::from).collect())
    }
}

impl<T> SearchService for T where T: DependOnRepository {}

fn distinct(books: Vec<Book>) -> Vec<Book> {
    let mut seen = HashSet::new();
    books
        .into_iter()
        .filter(|book| seen.insert(*book.id()))
        .collect()
}
