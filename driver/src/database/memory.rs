use std::collections::HashMap;

use error_stack::Report;
use tokio::sync::RwLock;

use kernel::interface::browse;
use kernel::interface::repository::{
    AuthorRepository, BookRepository, CatalogQuery, PublisherRepository, ReadingListRepository,
    ReviewRepository, UserRepository,
};
use kernel::prelude::entity::{
    Author, AuthorId, AuthorName, Book, BookId, Publisher, PublisherName, Review, ReviewBucket,
    User, UserName,
};
use kernel::KernelError;

/// Process-local backend. Everything is discarded when the process exits.
#[derive(Default)]
pub struct MemoryRepository {
    store: RwLock<MemoryStore>,
}

#[derive(Default)]
struct MemoryStore {
    users: Vec<User>,
    /// Kept ascending by book id.
    books: Vec<Book>,
    books_index: HashMap<BookId, usize>,
    authors: Vec<Author>,
    publishers: Vec<Publisher>,
    reviews: Vec<ReviewBucket>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryStore {
    fn insert_book(&mut self, book: Book) {
        let position = self.books.partition_point(|stored| stored < &book);
        self.books.insert(position, book);
        for (index, stored) in self.books.iter().enumerate().skip(position) {
            self.books_index.insert(*stored.id(), index);
        }
    }

    fn find_book(&self, id: &BookId) -> Option<&Book> {
        self.books_index.get(id).and_then(|index| self.books.get(*index))
    }

    fn find_book_mut(&mut self, id: &BookId) -> Option<&mut Book> {
        let index = *self.books_index.get(id)?;
        self.books.get_mut(index)
    }

    fn find_user_mut(&mut self, user_name: &UserName) -> Option<&mut User> {
        self.users
            .iter_mut()
            .find(|user| user.user_name() == user_name)
    }
}

#[async_trait::async_trait]
impl UserRepository for MemoryRepository {
    async fn add_user(&self, user: &User) -> error_stack::Result<(), KernelError> {
        self.store.write().await.users.push(user.clone());
        Ok(())
    }

    async fn get_user(
        &self,
        user_name: &UserName,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let store = self.store.read().await;
        let found = store
            .users
            .iter()
            .find(|user| user.user_name() == user_name)
            .cloned();
        Ok(found)
    }
}

#[async_trait::async_trait]
impl AuthorRepository for MemoryRepository {
    async fn add_author(&self, author: &Author) -> error_stack::Result<(), KernelError> {
        self.store.write().await.authors.push(author.clone());
        Ok(())
    }

    async fn get_author(&self, id: &AuthorId) -> error_stack::Result<Option<Author>, KernelError> {
        let store = self.store.read().await;
        let found = store.authors.iter().find(|author| author.id() == id).cloned();
        Ok(found)
    }

    async fn get_authors(&self) -> error_stack::Result<Vec<Author>, KernelError> {
        Ok(self.store.read().await.authors.clone())
    }
}

#[async_trait::async_trait]
impl BookRepository for MemoryRepository {
    async fn add_book(&self, book: &Book) -> error_stack::Result<(), KernelError> {
        self.store.write().await.insert_book(book.clone());
        Ok(())
    }

    async fn get_book(&self, id: &BookId) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(self.store.read().await.find_book(id).cloned())
    }

    async fn get_books(&self) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(self.store.read().await.books.clone())
    }

    async fn get_number_of_books(&self) -> error_stack::Result<usize, KernelError> {
        Ok(self.store.read().await.books.len())
    }
}

#[async_trait::async_trait]
impl PublisherRepository for MemoryRepository {
    async fn add_publisher(&self, publisher: &Publisher) -> error_stack::Result<(), KernelError> {
        self.store.write().await.publishers.push(publisher.clone());
        Ok(())
    }

    async fn get_publisher(
        &self,
        name: &PublisherName,
    ) -> error_stack::Result<Option<Publisher>, KernelError> {
        let store = self.store.read().await;
        let found = store
            .publishers
            .iter()
            .find(|publisher| publisher.name() == name)
            .cloned();
        Ok(found)
    }

    async fn get_publishers(&self) -> error_stack::Result<Vec<Publisher>, KernelError> {
        Ok(self.store.read().await.publishers.clone())
    }
}

#[async_trait::async_trait]
impl CatalogQuery for MemoryRepository {
    async fn get_books_for_author(
        &self,
        author_name: &AuthorName,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let store = self.store.read().await;
        let books = store
            .books
            .iter()
            .filter(|book| {
                book.authors()
                    .iter()
                    .any(|author| author.full_name() == author_name)
            })
            .cloned()
            .collect();
        Ok(books)
    }

    async fn order_books_by_title(&self) -> error_stack::Result<Vec<Book>, KernelError> {
        let books = self.store.read().await.books.clone();
        Ok(browse::order_books_by_title(books))
    }

    async fn order_books_by_year(&self) -> error_stack::Result<Vec<Book>, KernelError> {
        let books = self.store.read().await.books.clone();
        Ok(browse::order_books_by_year(books))
    }

    async fn order_authors_by_name(&self) -> error_stack::Result<Vec<Author>, KernelError> {
        let authors = self.store.read().await.authors.clone();
        Ok(browse::order_authors_by_name(authors))
    }

    async fn order_publishers_by_name(&self) -> error_stack::Result<Vec<Publisher>, KernelError> {
        let publishers = self.store.read().await.publishers.clone();
        Ok(browse::order_publishers_by_name(publishers))
    }
}

#[async_trait::async_trait]
impl ReviewRepository for MemoryRepository {
    async fn create_review(&self, book_id: &BookId) -> error_stack::Result<(), KernelError> {
        self.store
            .write()
            .await
            .reviews
            .push(ReviewBucket::new(*book_id));
        Ok(())
    }

    async fn add_review(
        &self,
        book_id: &BookId,
        review: &Review,
    ) -> error_stack::Result<(), KernelError> {
        let mut store = self.store.write().await;
        let Some(bucket) = store
            .reviews
            .iter_mut()
            .find(|bucket| bucket.book_id() == book_id)
        else {
            tracing::debug!("no review bucket for book {}, review dropped", book_id);
            return Ok(());
        };
        bucket.add_review(review.clone());
        if let Some(book) = store.find_book_mut(book_id) {
            book.add_review(review.clone());
        }
        if let Some(user_name) = review.user_name() {
            if let Some(user) = store.find_user_mut(user_name) {
                user.add_review(review.clone());
            }
        }
        Ok(())
    }

    async fn get_reviews(&self) -> error_stack::Result<Vec<ReviewBucket>, KernelError> {
        Ok(self.store.read().await.reviews.clone())
    }
}

#[async_trait::async_trait]
impl ReadingListRepository for MemoryRepository {
    async fn add_to_reading_list(
        &self,
        user: &mut User,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let mut store = self.store.write().await;
        let stored_book = store
            .find_book(book.id())
            .cloned()
            .ok_or_else(|| unknown_book(book))?;
        let stored_user = store
            .find_user_mut(user.user_name())
            .ok_or_else(|| unknown_user(user))?;
        stored_user.read_a_book(&stored_book);
        user.read_a_book(&stored_book);
        Ok(())
    }

    async fn remove_from_reading_list(
        &self,
        user: &mut User,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let mut store = self.store.write().await;
        let stored_user = store
            .find_user_mut(user.user_name())
            .ok_or_else(|| unknown_user(user))?;
        stored_user.remove_a_book(book);
        user.remove_a_book(book);
        Ok(())
    }
}

fn unknown_user(user: &User) -> Report<KernelError> {
    Report::new(KernelError::Validation)
        .attach_printable(format!("user {} is not registered", user.user_name()))
}

fn unknown_book(book: &Book) -> Report<KernelError> {
    Report::new(KernelError::Validation)
        .attach_printable(format!("book {} is not in the catalog", book.id()))
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use kernel::interface::repository::{
        AuthorRepository, BookRepository, CatalogQuery, PublisherRepository,
        ReadingListRepository, ReviewRepository, UserRepository,
    };
    use kernel::prelude::entity::{
        Author, AuthorId, AuthorName, Book, BookId, CreatedAt, PageCount, Publisher,
        PublisherName, Rating, Review, ReviewText, User, UserName,
    };
    use kernel::KernelError;

    use crate::database::MemoryRepository;

    fn review(book_id: i64, user: &str) -> error_stack::Result<Review, KernelError> {
        Ok(Review::new(
            Some(BookId::new(book_id)?),
            ReviewText::new("Great read"),
            Rating::new(4)?,
            Some(UserName::new(user)?),
            CreatedAt::new(datetime!(2020-02-28 14:31:26 UTC)),
        ))
    }

    #[tokio::test]
    async fn books_stay_sorted_by_id() -> error_stack::Result<(), KernelError> {
        let repository = MemoryRepository::new();
        for (id, title) in [(30, "c"), (10, "a"), (20, "b"), (5, "z")] {
            repository.add_book(&Book::from_raw(id, title)?).await?;
        }
        let ids = repository
            .get_books()
            .await?
            .iter()
            .map(|book| book.id().to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["5", "10", "20", "30"]);
        assert_eq!(repository.get_number_of_books().await?, 4);

        for id in [5, 10, 20, 30] {
            let found = repository.get_book(&BookId::new(id)?).await?;
            assert_eq!(found.map(|book| *book.id()), Some(BookId::new(id)?));
        }
        assert!(repository.get_book(&BookId::new(11)?).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn lookups_return_none_when_absent() -> error_stack::Result<(), KernelError> {
        let repository = MemoryRepository::new();
        assert!(repository.get_user(&UserName::new("nobody")?).await?.is_none());
        assert!(repository.get_author(&AuthorId::new(1)?).await?.is_none());
        assert!(repository
            .get_publisher(&PublisherName::new("Penguin"))
            .await?
            .is_none());

        repository.add_author(&Author::from_raw(1, "Neil Gaiman")?).await?;
        repository.add_publisher(&Publisher::new("Penguin")).await?;
        repository.add_user(&User::new(UserName::new("alice")?, "pw")).await?;
        assert!(repository.get_author(&AuthorId::new(1)?).await?.is_some());
        assert!(repository
            .get_publisher(&PublisherName::new("Penguin"))
            .await?
            .is_some());
        assert!(repository.get_user(&UserName::new("alice")?).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn orderings_do_not_touch_storage() -> error_stack::Result<(), KernelError> {
        let repository = MemoryRepository::new();
        repository.add_book(&Book::from_raw(1, "banana")?).await?;
        repository.add_book(&Book::from_raw(2, "Apple")?).await?;
        repository.add_author(&Author::from_raw(2, "Neil Gaiman")?).await?;
        repository.add_author(&Author::from_raw(1, "Garth Ennis")?).await?;

        let titles = repository
            .order_books_by_title()
            .await?
            .iter()
            .map(|book| book.title().to_string())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["Apple", "banana"]);
        assert_eq!(repository.get_books().await?[0].title().to_string(), "banana");

        let names = repository
            .order_authors_by_name()
            .await?
            .iter()
            .map(|author| author.full_name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Garth Ennis", "Neil Gaiman"]);
        assert_eq!(
            repository.get_authors().await?[0].full_name().to_string(),
            "Neil Gaiman"
        );
        Ok(())
    }

    #[tokio::test]
    async fn books_for_author_match_by_name() -> error_stack::Result<(), KernelError> {
        let repository = MemoryRepository::new();
        let urasawa = Author::from_raw(3188368, "Naoki Urasawa")?;
        for id in [13340336, 2250580] {
            let mut book = Book::from_raw(id, "20th Century Boys")?;
            book.add_author(urasawa.clone());
            repository.add_book(&book).await?;
        }
        repository.add_book(&Book::from_raw(1, "Unrelated")?).await?;

        let found = repository
            .get_books_for_author(&AuthorName::new("Naoki Urasawa")?)
            .await?;
        let ids = found.iter().map(|book| book.id().to_string()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["2250580", "13340336"]);
        Ok(())
    }

    #[tokio::test]
    async fn review_needs_a_bucket() -> error_stack::Result<(), KernelError> {
        let repository = MemoryRepository::new();
        repository.add_book(&Book::from_raw(1, "Reviewed")?).await?;
        repository.add_user(&User::new(UserName::new("alice")?, "pw")).await?;

        repository.add_review(&BookId::new(1)?, &review(1, "alice")?).await?;
        assert!(repository.get_reviews().await?.is_empty());

        repository.create_review(&BookId::new(1)?).await?;
        repository.add_review(&BookId::new(1)?, &review(1, "alice")?).await?;
        let buckets = repository.get_reviews().await?;
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].reviews(), &vec![review(1, "alice")?]);

        let book = repository
            .get_book(&BookId::new(1)?)
            .await?
            .expect("book was stored");
        assert_eq!(book.reviews().len(), 1);
        let alice = repository
            .get_user(&UserName::new("alice")?)
            .await?
            .expect("alice was stored");
        assert_eq!(alice.reviews().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn reading_list_updates_caller_and_store() -> error_stack::Result<(), KernelError> {
        let repository = MemoryRepository::new();
        let mut book = Book::from_raw(1, "Thick")?;
        book.set_num_pages(PageCount::new(120));
        repository.add_book(&book).await?;
        let mut alice = User::new(UserName::new("alice")?, "pw");
        repository.add_user(&alice).await?;

        repository.add_to_reading_list(&mut alice, &book).await?;
        assert_eq!(alice.read_books(), &vec![book.clone()]);
        assert_eq!(*alice.pages_read(), 120);
        let stored = repository
            .get_user(&UserName::new("alice")?)
            .await?
            .expect("alice was stored");
        assert_eq!(*stored.pages_read(), 120);

        repository.remove_from_reading_list(&mut alice, &book).await?;
        assert_eq!(*alice.pages_read(), 0);

        let mut stranger = User::new(UserName::new("stranger")?, "pw");
        let error = repository
            .add_to_reading_list(&mut stranger, &book)
            .await
            .expect_err("stranger is not registered");
        assert_eq!(error.current_context(), &KernelError::Validation);
        Ok(())
    }
}
