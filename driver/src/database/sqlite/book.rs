use sqlx::SqliteConnection;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::repository::{BookRepository, CatalogQuery};
use kernel::prelude::entity::{
    Author, AuthorName, Book, BookId, PageCount, Publisher, ReleaseYear,
};
use kernel::KernelError;

use crate::database::sqlite::author::SqliteAuthorInternal;
use crate::database::sqlite::publisher::SqlitePublisherInternal;
use crate::database::sqlite::review::SqliteReviewInternal;
use crate::database::sqlite::single;
use crate::database::SqliteRepository;
use crate::error::ConvertError;

#[async_trait::async_trait]
impl BookRepository for SqliteRepository {
    async fn add_book(&self, book: &Book) -> error_stack::Result<(), KernelError> {
        let mut con = self.db.transact().await?;
        SqliteBookInternal::create(&mut con, book).await?;
        con.commit().await?;
        tracing::debug!("stored {}", book);
        Ok(())
    }

    async fn get_book(&self, id: &BookId) -> error_stack::Result<Option<Book>, KernelError> {
        let mut con = self.db.transact().await?;
        SqliteBookInternal::find_by_id(&mut con, id).await
    }

    async fn get_books(&self) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut con = self.db.transact().await?;
        SqliteBookInternal::find_all(&mut con).await
    }

    async fn get_number_of_books(&self) -> error_stack::Result<usize, KernelError> {
        let mut con = self.db.transact().await?;
        SqliteBookInternal::count(&mut con).await
    }
}

#[async_trait::async_trait]
impl CatalogQuery for SqliteRepository {
    async fn get_books_for_author(
        &self,
        author_name: &AuthorName,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut con = self.db.transact().await?;
        SqliteBookInternal::find_for_author(&mut con, author_name).await
    }

    async fn order_books_by_title(&self) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut con = self.db.transact().await?;
        SqliteBookInternal::find_all_ordered_by_title(&mut con).await
    }

    async fn order_books_by_year(&self) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut con = self.db.transact().await?;
        SqliteBookInternal::find_all_ordered_by_year(&mut con).await
    }

    async fn order_authors_by_name(&self) -> error_stack::Result<Vec<Author>, KernelError> {
        let mut con = self.db.transact().await?;
        SqliteAuthorInternal::find_all_ordered_by_name(&mut con).await
    }

    async fn order_publishers_by_name(&self) -> error_stack::Result<Vec<Publisher>, KernelError> {
        let mut con = self.db.transact().await?;
        SqlitePublisherInternal::find_all_ordered_by_name(&mut con).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    book_id: i64,
    title: String,
    description: Option<String>,
    publisher_id: Option<i64>,
    release_year: Option<i32>,
    num_pages: Option<i64>,
    ebook: bool,
}

pub(in crate::database) struct SqliteBookInternal;

impl SqliteBookInternal {
    async fn create(
        con: &mut SqliteConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let publisher_id = match book.publisher() {
            Some(publisher) => Some(SqlitePublisherInternal::resolve(&mut *con, publisher).await?),
            None => None,
        };
        // language=sqlite
        sqlx::query(
            r#"
            INSERT INTO books (book_id, title, description, publisher_id, release_year, num_pages, ebook)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(*book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.description().as_ref().map(AsRef::<String>::as_ref))
        .bind(publisher_id)
        .bind(book.release_year().map(|year| *year.as_ref()))
        .bind(book.num_pages().map(|pages| *pages.as_ref()))
        .bind(*book.ebook())
        .execute(&mut *con)
        .await
        .convert_error()?;
        for author in book.authors() {
            SqliteAuthorInternal::attach_to_book(&mut *con, book.id(), author).await?;
        }
        Ok(())
    }

    /// Rebuilds the full entity: publisher, authors and reviews included.
    async fn assemble(
        con: &mut SqliteConnection,
        row: BookRow,
    ) -> error_stack::Result<Book, KernelError> {
        let mut book = Book::from_raw(row.book_id, row.title)?;
        if let Some(description) = row.description {
            book.set_description(description);
        }
        book.set_release_year(row.release_year.map(ReleaseYear::new).transpose()?);
        book.set_num_pages(row.num_pages.and_then(PageCount::new));
        book.set_ebook(row.ebook);
        if let Some(publisher_id) = row.publisher_id {
            let publisher = SqlitePublisherInternal::find_by_id(&mut *con, publisher_id).await?;
            book.set_publisher(publisher);
        }
        for author in SqliteAuthorInternal::find_for_book(&mut *con, book.id()).await? {
            book.add_author(author);
        }
        for review in SqliteReviewInternal::find_for_book(&mut *con, book.id()).await? {
            book.add_review(review);
        }
        Ok(book)
    }

    async fn assemble_all(
        con: &mut SqliteConnection,
        rows: Vec<BookRow>,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut books = Vec::with_capacity(rows.len());
        for row in rows {
            books.push(Self::assemble(&mut *con, row).await?);
        }
        Ok(books)
    }

    pub(in crate::database) async fn find_by_id(
        con: &mut SqliteConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=sqlite
            r#"
            SELECT book_id, title, description, publisher_id, release_year, num_pages, ebook
            FROM books
            WHERE book_id = ?
            "#,
        )
        .bind(*id.as_ref())
        .fetch_all(&mut *con)
        .await
        .convert_error()?;
        match single(rows, || format!("book {}", id))? {
            Some(row) => Ok(Some(Self::assemble(con, row).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(
        con: &mut SqliteConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=sqlite
            r#"
            SELECT book_id, title, description, publisher_id, release_year, num_pages, ebook
            FROM books
            ORDER BY book_id ASC
            "#,
        )
        .fetch_all(&mut *con)
        .await
        .convert_error()?;
        Self::assemble_all(con, rows).await
    }

    pub(in crate::database) async fn find_ids(
        con: &mut SqliteConnection,
    ) -> error_stack::Result<Vec<BookId>, KernelError> {
        let ids: Vec<(i64,)> = sqlx::query_as(
            // language=sqlite
            r#"
            SELECT book_id
            FROM books
            ORDER BY book_id ASC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        ids.into_iter().map(|(id,)| BookId::new(id)).collect()
    }

    pub(in crate::database) async fn count(
        con: &mut SqliteConnection,
    ) -> error_stack::Result<usize, KernelError> {
        let (count,): (i64,) = sqlx::query_as(
            // language=sqlite
            r#"
            SELECT COUNT(*)
            FROM books
            "#,
        )
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn find_for_author(
        con: &mut SqliteConnection,
        author_name: &AuthorName,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=sqlite
            r#"
            SELECT DISTINCT b.book_id, b.title, b.description, b.publisher_id, b.release_year, b.num_pages, b.ebook
            FROM books b
            JOIN book_authors ba ON ba.book_id = b.book_id
            JOIN authors a ON a.author_id = ba.author_id
            WHERE a.full_name = ?
            ORDER BY b.book_id ASC
            "#,
        )
        .bind(author_name.as_ref())
        .fetch_all(&mut *con)
        .await
        .convert_error()?;
        Self::assemble_all(con, rows).await
    }

    /// Reading list of `user_id`, oldest entry first. Repeated reads appear repeatedly.
    pub(in crate::database) async fn find_read_by_user(
        con: &mut SqliteConnection,
        user_id: i64,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=sqlite
            r#"
            SELECT b.book_id, b.title, b.description, b.publisher_id, b.release_year, b.num_pages, b.ebook
            FROM user_reading_lists l
            JOIN books b ON b.book_id = l.book_id
            WHERE l.user_id = ?
            ORDER BY l.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *con)
        .await
        .convert_error()?;
        Self::assemble_all(con, rows).await
    }

    async fn find_all_ordered_by_title(
        con: &mut SqliteConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=sqlite
            r#"
            SELECT book_id, title, description, publisher_id, release_year, num_pages, ebook
            FROM books
            ORDER BY title ASC, book_id ASC
            "#,
        )
        .fetch_all(&mut *con)
        .await
        .convert_error()?;
        Self::assemble_all(con, rows).await
    }

    async fn find_all_ordered_by_year(
        con: &mut SqliteConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=sqlite
            r#"
            SELECT book_id, title, description, publisher_id, release_year, num_pages, ebook
            FROM books
            WHERE release_year IS NOT NULL
            ORDER BY release_year DESC, book_id ASC
            "#,
        )
        .fetch_all(&mut *con)
        .await
        .convert_error()?;
        Self::assemble_all(con, rows).await
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::repository::{
        AuthorRepository, BookRepository, CatalogQuery, PublisherRepository,
    };
    use kernel::prelude::entity::{
        Author, AuthorName, Book, BookId, PageCount, Publisher, ReleaseYear,
    };
    use kernel::KernelError;

    use crate::database::{SqliteDatabase, SqliteRepository};

    fn book(id: i64, title: &str, year: Option<i32>) -> error_stack::Result<Book, KernelError> {
        let mut book = Book::from_raw(id, title)?;
        book.set_release_year(year.map(ReleaseYear::new).transpose()?);
        Ok(book)
    }

    #[tokio::test]
    async fn book_round_trip_keeps_relations() -> error_stack::Result<(), KernelError> {
        let repository = SqliteRepository::new(SqliteDatabase::in_memory().await?);
        let mut stored = book(27036537, "Crossed, Volume 15", Some(2016))?;
        stored.set_description("  Survivors on the road.  ");
        stored.set_publisher(Some(Publisher::new("Avatar Press")));
        stored.set_num_pages(PageCount::new(160));
        stored.set_ebook(true);
        stored.add_author(Author::from_raw(14965, "Garth Ennis")?);
        stored.add_author(Author::from_raw(4523, "Christian Zanier")?);
        repository.add_book(&stored).await?;

        let found = repository
            .get_book(&BookId::new(27036537)?)
            .await?
            .expect("book was stored");
        assert_eq!(found, stored);
        assert_eq!(found.title().to_string(), "Crossed, Volume 15");
        assert_eq!(
            found.description().clone().map(String::from),
            Some("Survivors on the road.".to_string())
        );
        assert_eq!(found.publisher(), &Some(Publisher::new("Avatar Press")));
        assert_eq!(found.release_year(), &Some(ReleaseYear::new(2016)?));
        assert_eq!(found.num_pages(), &PageCount::new(160));
        assert!(*found.ebook());
        let authors = found
            .authors()
            .iter()
            .map(|author| author.full_name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(authors, vec!["Garth Ennis", "Christian Zanier"]);

        assert!(repository.get_book(&BookId::new(1)?).await?.is_none());
        assert_eq!(repository.get_authors().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn shared_publisher_and_author_are_stored_once() -> error_stack::Result<(), KernelError> {
        let repository = SqliteRepository::new(SqliteDatabase::in_memory().await?);
        let ennis = Author::from_raw(14965, "Garth Ennis")?;
        for (id, title) in [(2, "Crossed, Volume 9"), (1, "War Stories, Volume 3")] {
            let mut stored = book(id, title, Some(2014))?;
            stored.set_publisher(Some(Publisher::new("Avatar Press")));
            stored.add_author(ennis.clone());
            repository.add_book(&stored).await?;
        }
        assert_eq!(repository.get_number_of_books().await?, 2);
        assert_eq!(repository.get_publishers().await?.len(), 1);
        assert_eq!(repository.get_authors().await?, vec![ennis]);

        let ids = repository
            .get_books_for_author(&AuthorName::new("Garth Ennis")?)
            .await?
            .iter()
            .map(|book| book.id().to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(repository
            .get_books_for_author(&AuthorName::new("Alan Moore")?)
            .await?
            .is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn orderings_come_from_the_query() -> error_stack::Result<(), KernelError> {
        let repository = SqliteRepository::new(SqliteDatabase::in_memory().await?);
        for stored in [
            book(3, "banana", Some(2014))?,
            book(1, "Apple", None)?,
            book(4, "apple", Some(2016))?,
            book(2, "Banana", Some(1997))?,
        ] {
            repository.add_book(&stored).await?;
        }
        let ids = |books: Vec<Book>| {
            books
                .iter()
                .map(|book| book.id().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(repository.get_books().await?), vec!["1", "2", "3", "4"]);
        assert_eq!(
            ids(repository.order_books_by_title().await?),
            vec!["1", "2", "4", "3"]
        );
        assert_eq!(
            ids(repository.order_books_by_year().await?),
            vec!["4", "3", "2"]
        );

        repository.add_author(&Author::from_raw(1, "Neil Gaiman")?).await?;
        repository.add_author(&Author::from_raw(2, "Garth Ennis")?).await?;
        repository.add_publisher(&Publisher::new("Penguin")).await?;
        repository.add_publisher(&Publisher::new("Avatar Press")).await?;
        let names = repository
            .order_authors_by_name()
            .await?
            .iter()
            .map(|author| author.full_name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Garth Ennis", "Neil Gaiman"]);
        assert_eq!(
            repository.order_publishers_by_name().await?,
            vec![Publisher::new("Avatar Press"), Publisher::new("Penguin")]
        );
        Ok(())
    }
}
