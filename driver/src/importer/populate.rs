use std::path::{Path, PathBuf};

use kernel::interface::repository::Repository;
use kernel::prelude::entity::{
    Book, BookId, BooksInventory, CreatedAt, Rating, Review, ReviewText, User, UserName,
};
use kernel::KernelError;

use crate::importer::{
    parse_timestamp, read_csv, BooksJsonReader, Catalog, ReviewRecord, UserRecord,
};

pub const BOOKS_FILE: &str = "comic_books_excerpt.json";
pub const AUTHORS_FILE: &str = "book_authors_excerpt.json";
pub const USERS_FILE: &str = "users.csv";
pub const REVIEWS_FILE: &str = "reviews.csv";

#[derive(Debug, Clone)]
pub struct SourceFiles {
    pub books: PathBuf,
    pub authors: PathBuf,
    pub users: PathBuf,
    pub reviews: PathBuf,
}

impl SourceFiles {
    /// The standard file names inside `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            books: dir.join(BOOKS_FILE),
            authors: dir.join(AUTHORS_FILE),
            users: dir.join(USERS_FILE),
            reviews: dir.join(REVIEWS_FILE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationStrategy {
    /// Adds books as they are read and opens a review bucket for each.
    Transient,
    /// Builds the whole graph first, then inserts parents before children.
    Persistent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationSummary {
    pub users: usize,
    pub books: usize,
    pub authors: usize,
    pub publishers: usize,
    pub reviews: usize,
}

/// Seeds an empty repository. Users first, then the catalog, then reviews.
pub async fn populate<R>(
    repository: &R,
    files: &SourceFiles,
    strategy: PopulationStrategy,
) -> error_stack::Result<PopulationSummary, KernelError>
where
    R: Repository + ?Sized,
{
    let users = load_users(repository, &files.users).await?;
    let catalog = BooksJsonReader::new(&files.books, &files.authors)
        .read()
        .await?;
    let reviews = read_csv::<ReviewRecord>(&files.reviews)?;

    let mut summary = PopulationSummary {
        users,
        books: catalog.books.len(),
        authors: catalog.authors.len(),
        publishers: catalog.publishers.len(),
        reviews: 0,
    };
    summary.reviews = match strategy {
        PopulationStrategy::Transient => load_transient(repository, catalog, reviews).await?,
        PopulationStrategy::Persistent => load_persistent(repository, catalog, reviews).await?,
    };
    tracing::info!(
        "populated {:?} repository: {} users, {} books, {} authors, {} publishers, {} reviews",
        strategy,
        summary.users,
        summary.books,
        summary.authors,
        summary.publishers,
        summary.reviews
    );
    Ok(summary)
}

async fn load_users<R>(repository: &R, path: &Path) -> error_stack::Result<usize, KernelError>
where
    R: Repository + ?Sized,
{
    let records = read_csv::<UserRecord>(path)?;
    for record in &records {
        let user = User::new(UserName::new(record.user_name.as_str())?, &record.password);
        repository.add_user(&user).await?;
    }
    Ok(records.len())
}

async fn load_transient<R>(
    repository: &R,
    catalog: Catalog,
    reviews: Vec<ReviewRecord>,
) -> error_stack::Result<usize, KernelError>
where
    R: Repository + ?Sized,
{
    for book in &catalog.books {
        repository.add_book(book).await?;
        repository.create_review(book.id()).await?;
    }
    for author in &catalog.authors {
        repository.add_author(author).await?;
    }
    for publisher in &catalog.publishers {
        repository.add_publisher(publisher).await?;
    }

    let mut added = 0;
    for record in &reviews {
        let book_id = BookId::new(record.book_id)?;
        let book = repository.get_book(&book_id).await?;
        let review = to_review(repository, book.as_ref(), record).await?;
        repository.add_review(&book_id, &review).await?;
        if book.is_some() {
            added += 1;
        }
    }
    Ok(added)
}

async fn load_persistent<R>(
    repository: &R,
    catalog: Catalog,
    reviews: Vec<ReviewRecord>,
) -> error_stack::Result<usize, KernelError>
where
    R: Repository + ?Sized,
{
    let Catalog {
        books,
        authors,
        publishers,
    } = catalog;
    let mut inventory = BooksInventory::new();
    for book in &books {
        inventory.add_book(book.clone());
    }

    let mut prepared: Vec<(BookId, Review)> = Vec::new();
    for record in &reviews {
        let book_id = BookId::new(record.book_id)?;
        let Some(book) = inventory.find_book(&book_id) else {
            tracing::warn!("review of unknown book {} skipped", book_id);
            continue;
        };
        let review = to_review(repository, Some(book), record).await?;
        if !prepared.iter().any(|(_, seen)| seen == &review) {
            prepared.push((book_id, review));
        }
    }

    for author in &authors {
        repository.add_author(author).await?;
    }
    for publisher in &publishers {
        repository.add_publisher(publisher).await?;
    }
    for book in &books {
        repository.add_book(book).await?;
    }

    let mut added = 0;
    for (book_id, review) in &prepared {
        match repository.add_review(book_id, review).await {
            Ok(()) => added += 1,
            Err(error) => tracing::warn!("skipped {}: {:?}", review, error),
        }
    }
    if added < prepared.len() {
        tracing::warn!("{} of {} reviews were not stored", prepared.len() - added, prepared.len());
    }
    Ok(added)
}

async fn to_review<R>(
    repository: &R,
    book: Option<&Book>,
    record: &ReviewRecord,
) -> error_stack::Result<Review, KernelError>
where
    R: Repository + ?Sized,
{
    let user = repository
        .get_user(&UserName::new(record.user_name.as_str())?)
        .await?;
    Ok(Review::new(
        book.map(|book| *book.id()),
        ReviewText::new(record.review_text.as_str()),
        Rating::new(record.rating)?,
        user.map(|user| user.user_name().clone()),
        CreatedAt::new(parse_timestamp(&record.timestamp)?),
    ))
}
