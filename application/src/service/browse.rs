use error_stack::Report;

use kernel::interface::browse::group_books_by_year;
use kernel::interface::repository::{BookRepository, CatalogQuery, DependOnRepository};
use kernel::prelude::entity::{AuthorName, BookId, PublisherName, ReleaseYear};

use crate::error::{ApplicationError, ConvertError};
use crate::transfer::{AuthorDto, BookDto, BooksByYearDto, PublisherDto};

#[async_trait::async_trait]
pub trait BrowseService: 'static + Sync + Send + DependOnRepository {
    async fn get_book(&self, id: i64) -> error_stack::Result<Option<BookDto>, ApplicationError> {
        let id = BookId::new(id).convert_error()?;
        let book = BookRepository::get_book(self.repository(), &id)
            .await
            .convert_error()?;
        Ok(book.map(BookDto::from))
    }

    async fn books_by_title(&self) -> error_stack::Result<Vec<BookDto>, ApplicationError> {
        let books = self.repository().order_books_by_title().await.convert_error()?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    /// One release year of the catalog with its neighbours. `None` selects
    /// the newest year; a year without books yields `Ok(None)`.
    async fn books_by_year(
        &self,
        year: Option<i32>,
    ) -> error_stack::Result<Option<BooksByYearDto>, ApplicationError> {
        let books = self.repository().order_books_by_year().await.convert_error()?;
        let mut grouped = group_books_by_year(books);
        let year = match year {
            Some(year) => ReleaseYear::new(year).convert_error()?,
            None => match grouped.keys().next_back() {
                Some(newest) => *newest,
                None => return Ok(None),
            },
        };
        let previous = self.repository().year_of_previous_book(&grouped, &year);
        let next = self.repository().year_of_next_book(&grouped, &year);
        Ok(grouped
            .remove(&year)
            .map(|books| BooksByYearDto::new(year, books, previous, next)))
    }

    async fn books_for_author(
        &self,
        author_name: &str,
    ) -> error_stack::Result<Vec<BookDto>, ApplicationError> {
        let author_name = AuthorName::new(author_name).convert_error()?;
        let books = self
            .repository()
            .get_books_for_author(&author_name)
            .await
            .convert_error()?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn books_by_publisher(
        &self,
        publisher_name: &str,
    ) -> error_stack::Result<Vec<BookDto>, ApplicationError> {
        let publisher_name = PublisherName::new(publisher_name);
        if publisher_name.is_unknown() {
            return Err(Report::new(ApplicationError::InvalidInput)
                .attach_printable("publisher name must not be blank"));
        }
        let books = self.repository().get_books().await.convert_error()?;
        Ok(books
            .into_iter()
            .filter(|book| {
                book.publisher()
                    .as_ref()
                    .is_some_and(|publisher| publisher.name() == &publisher_name)
            })
            .map(BookDto::from)
            .collect())
    }

    async fn authors_by_name(&self) -> error_stack::Result<Vec<AuthorDto>, ApplicationError> {
        let authors = self.repository().order_authors_by_name().await.convert_error()?;
        Ok(authors.into_iter().map(AuthorDto::from).collect())
    }

    async fn publishers_by_name(&self) -> error_stack::Result<Vec<PublisherDto>, ApplicationError> {
        let publishers = self
            .repository()
            .order_publishers_by_name()
            .await
            .convert_error()?;
        Ok(publishers.into_iter().map(PublisherDto::from).collect())
    }

    async fn count_books(&self) -> error_stack::Result<usize, ApplicationError> {
        self.repository().get_number_of_books().await.convert_error()
    }
}

impl<T> BrowseService for T where T: DependOnRepository {}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use crate::error::ApplicationError;
    use crate::service::fixture::seeded;
    use crate::service::BrowseService;

    #[tokio::test]
    async fn books_by_year_defaults_to_newest() -> error_stack::Result<(), KernelError> {
        let module = seeded().await?;
        let page = module.books_by_year(None).await.unwrap().unwrap();
        assert_eq!(page.year, 2017);
        assert_eq!(page.books.len(), 1);
        assert_eq!(page.previous_year, Some(2016));
        assert_eq!(page.next_year, Some(1997));

        let page = module.books_by_year(Some(2016)).await.unwrap().unwrap();
        assert_eq!(page.books.len(), 5);
        assert_eq!(page.previous_year, Some(2015));
        assert_eq!(page.next_year, Some(2017));

        assert!(module.books_by_year(Some(1999)).await.unwrap().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn lookups_by_author_and_publisher() -> error_stack::Result<(), KernelError> {
        let module = seeded().await?;
        let urasawa = module.books_for_author("Naoki Urasawa").await.unwrap();
        assert_eq!(
            urasawa.iter().map(|book| book.id).collect::<Vec<_>>(),
            vec![2250580, 13340336, 25203716]
        );
        let dargaud = module.books_by_publisher("Dargaud").await.unwrap();
        assert_eq!(
            dargaud.iter().map(|book| book.id).collect::<Vec<_>>(),
            vec![1318652, 30128855]
        );
        let blank = module.books_by_publisher("  ").await.unwrap_err();
        assert_eq!(blank.current_context(), &ApplicationError::InvalidInput);
        Ok(())
    }

    #[tokio::test]
    async fn listings_are_sorted_by_name() -> error_stack::Result<(), KernelError> {
        let module = seeded().await?;
        let authors = module.authors_by_name().await.unwrap();
        assert_eq!(
            authors
                .iter()
                .map(|author| author.full_name.as_str())
                .collect::<Vec<_>>(),
            vec!["Garth Ennis", "Lindsey Schussman", "Naoki Urasawa"]
        );
        let publishers = module.publishers_by_name().await.unwrap();
        assert_eq!(
            publishers
                .iter()
                .map(|publisher| publisher.name.as_str())
                .collect::<Vec<_>>(),
            vec!["Avatar Press", "Dargaud"]
        );
        assert_eq!(module.count_books().await.unwrap(), 20);
        Ok(())
    }

    #[tokio::test]
    async fn single_book_carries_reviews() -> error_stack::Result<(), KernelError> {
        let module = seeded().await?;
        let book = module.get_book(25742454).await.unwrap().unwrap();
        assert_eq!(book.title, "The Switchblade Mamma");
        assert_eq!(book.reviews.len(), 2);
        assert_eq!(book.authors[0].full_name, "Lindsey Schussman");
        assert!(module.get_book(1).await.unwrap().is_none());
        let negative = module.get_book(-1).await.unwrap_err();
        assert_eq!(negative.current_context(), &ApplicationError::InvalidInput);
        Ok(())
    }
}
