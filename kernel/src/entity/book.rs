mod description;
mod id;
mod page_count;
mod release_year;
mod title;

pub use self::{description::*, id::*, page_count::*, release_year::*, title::*};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use destructure::Destructure;
use vodca::References;

use crate::entity::{Author, Publisher, Review};
use crate::KernelError;

/// Equality and ordering only look at the book id.
#[derive(Debug, Clone, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    description: Option<BookDescription>,
    publisher: Option<Publisher>,
    authors: Vec<Author>,
    release_year: Option<ReleaseYear>,
    num_pages: Option<PageCount>,
    ebook: bool,
    reviews: Vec<Review>,
}

impl Book {
    pub fn new(id: BookId, title: BookTitle) -> Self {
        Self {
            id,
            title,
            description: None,
            publisher: None,
            authors: Vec::new(),
            release_year: None,
            num_pages: None,
            ebook: false,
            reviews: Vec::new(),
        }
    }

    pub fn from_raw(
        id: impl Into<i64>,
        title: impl Into<String>,
    ) -> error_stack::Result<Self, KernelError> {
        Ok(Self::new(BookId::new(id)?, BookTitle::new(title)?))
    }

    pub fn set_title(&mut self, title: BookTitle) {
        self.title = title;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(BookDescription::new(description));
    }

    pub fn set_publisher(&mut self, publisher: Option<Publisher>) {
        self.publisher = publisher;
    }

    pub fn set_release_year(&mut self, release_year: Option<ReleaseYear>) {
        self.release_year = release_year;
    }

    pub fn set_num_pages(&mut self, num_pages: Option<PageCount>) {
        self.num_pages = num_pages;
    }

    pub fn set_ebook(&mut self, ebook: bool) {
        self.ebook = ebook;
    }

    /// Appends `author` unless an author with the same id is already listed.
    pub fn add_author(&mut self, author: Author) {
        if self.authors.contains(&author) {
            return;
        }
        self.authors.push(author);
    }

    pub fn remove_author(&mut self, author: &Author) {
        self.authors.retain(|listed| listed != author);
    }

    pub fn add_review(&mut self, review: Review) {
        self.reviews.push(review);
    }

    pub fn is_written_by(&self, author: &Author) -> bool {
        self.authors.contains(author)
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Book {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Book {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Book {}, book id = {}>", self.title, self.id)
    }
}
