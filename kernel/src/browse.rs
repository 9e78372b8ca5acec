use std::collections::BTreeMap;

use crate::entity::{Author, Book, Publisher, ReleaseYear};

/// Books grouped by release year, years ascending.
pub type BooksByYear = BTreeMap<ReleaseYear, Vec<Book>>;

pub fn order_books_by_title(books: impl IntoIterator<Item = Book>) -> Vec<Book> {
    let mut books = books.into_iter().collect::<Vec<_>>();
    books.sort_by(|a, b| a.title().cmp(b.title()));
    books
}

/// Newest first. Books without a release year are left out.
pub fn order_books_by_year(books: impl IntoIterator<Item = Book>) -> Vec<Book> {
    let mut books = books
        .into_iter()
        .filter(|book| book.release_year().is_some())
        .collect::<Vec<_>>();
    books.sort_by(|a, b| b.release_year().cmp(a.release_year()));
    books
}

pub fn order_authors_by_name(authors: impl IntoIterator<Item = Author>) -> Vec<Author> {
    let mut authors = authors.into_iter().collect::<Vec<_>>();
    authors.sort_by(|a, b| a.full_name().cmp(b.full_name()));
    authors
}

pub fn order_publishers_by_name(publishers: impl IntoIterator<Item = Publisher>) -> Vec<Publisher> {
    let mut publishers = publishers.into_iter().collect::<Vec<_>>();
    publishers.sort_by(|a, b| a.name().cmp(b.name()));
    publishers
}

pub fn group_books_by_year(books: impl IntoIterator<Item = Book>) -> BooksByYear {
    let mut grouped = BooksByYear::new();
    for book in books {
        if let Some(year) = *book.release_year() {
            grouped.entry(year).or_default().push(book);
        }
    }
    grouped
}

/// The year before `current`, wrapping from the first year to the last.
pub fn year_of_previous_book(grouped: &BooksByYear, current: &ReleaseYear) -> Option<ReleaseYear> {
    step_year(grouped, current, |index, len| (index + len - 1) % len)
}

/// The year after `current`, wrapping from the last year to the first.
pub fn year_of_next_book(grouped: &BooksByYear, current: &ReleaseYear) -> Option<ReleaseYear> {
    step_year(grouped, current, |index, len| (index + 1) % len)
}

fn step_year(
    grouped: &BooksByYear,
    current: &ReleaseYear,
    step: impl FnOnce(usize, usize) -> usize,
) -> Option<ReleaseYear> {
    let years = grouped.keys().copied().collect::<Vec<_>>();
    let index = years.iter().position(|year| year == current)?;
    years.get(step(index, years.len())).copied()
}
