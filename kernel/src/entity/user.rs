mod name;
mod password;

pub use self::{name::*, password::*};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use destructure::Destructure;
use vodca::References;

use crate::entity::{Book, Review};

#[derive(Debug, Clone, References, Destructure)]
pub struct User {
    user_name: UserName,
    password: Option<UserPassword>,
    read_books: Vec<Book>,
    pages_read: i64,
    reviews: Vec<Review>,
}

impl User {
    /// Hashes `password`; a blank password leaves the user without one.
    pub fn new(user_name: UserName, password: &str) -> Self {
        Self::with_password(user_name, UserPassword::hash(password))
    }

    pub fn with_password(user_name: UserName, password: Option<UserPassword>) -> Self {
        Self {
            user_name,
            password,
            read_books: Vec::new(),
            pages_read: 0,
            reviews: Vec::new(),
        }
    }

    pub fn verify_password(&self, raw: &str) -> bool {
        self.password
            .as_ref()
            .is_some_and(|password| password.verify(raw))
    }

    pub fn read_a_book(&mut self, book: &Book) {
        self.read_books.push(book.clone());
        if let Some(pages) = book.num_pages() {
            self.pages_read += pages.as_ref();
        }
    }

    /// Removes the earliest entry for `book`, if any.
    pub fn remove_a_book(&mut self, book: &Book) {
        let Some(position) = self.read_books.iter().position(|read| read == book) else {
            return;
        };
        let removed = self.read_books.remove(position);
        if let Some(pages) = removed.num_pages() {
            self.pages_read -= pages.as_ref();
        }
    }

    pub fn add_review(&mut self, review: Review) {
        self.reviews.push(review);
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.user_name == other.user_name
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.user_name.hash(state);
    }
}

impl PartialOrd for User {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for User {
    fn cmp(&self, other: &Self) -> Ordering {
        self.user_name.cmp(&other.user_name)
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<User {}>", self.user_name)
    }
}
