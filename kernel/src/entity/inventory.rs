use std::collections::HashMap;

use crate::entity::{Book, BookId};

/// Book id keyed index with optional shop data, used while seeding.
#[derive(Debug, Default, Clone)]
pub struct BooksInventory {
    books: HashMap<BookId, Book>,
    prices: HashMap<BookId, u32>,
    stock: HashMap<BookId, u32>,
}

impl BooksInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any book already stored under the same id.
    pub fn add_book(&mut self, book: Book) {
        self.books.insert(*book.id(), book);
    }

    pub fn add_book_with_stock(&mut self, book: Book, price: u32, stock: u32) {
        let id = *book.id();
        self.add_book(book);
        self.prices.insert(id, price);
        self.stock.insert(id, stock);
    }

    pub fn remove_book(&mut self, id: &BookId) -> Option<Book> {
        self.prices.remove(id);
        self.stock.remove(id);
        self.books.remove(id)
    }

    pub fn find_book(&self, id: &BookId) -> Option<&Book> {
        self.books.get(id)
    }

    pub fn find_book_mut(&mut self, id: &BookId) -> Option<&mut Book> {
        self.books.get_mut(id)
    }

    pub fn find_price(&self, id: &BookId) -> Option<u32> {
        self.prices.get(id).copied()
    }

    pub fn find_stock_count(&self, id: &BookId) -> u32 {
        self.stock.get(id).copied().unwrap_or(0)
    }

    pub fn search_book_by_title(&self, title: &str) -> Option<&Book> {
        self.books
            .values()
            .find(|book| AsRef::<String>::as_ref(book.title()) == title)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
