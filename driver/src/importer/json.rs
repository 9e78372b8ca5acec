use std::collections::HashMap;
use std::path::{Path, PathBuf};

use error_stack::{Report, ResultExt};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use kernel::prelude::entity::{Author, Book, PageCount, Publisher, ReleaseYear};
use kernel::KernelError;

use crate::error::ConvertError;

/// Goodreads ids show up both as numbers and as strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonId {
    Number(i64),
    Text(String),
}

impl JsonId {
    fn value(&self) -> error_stack::Result<i64, KernelError> {
        match self {
            JsonId::Number(id) => Ok(*id),
            JsonId::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|error| Report::new(error).change_context(KernelError::Validation))
                .attach_printable_lazy(|| format!("invalid id {:?}", text)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BookRecord {
    book_id: JsonId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    publication_year: String,
    #[serde(default)]
    num_pages: String,
    #[serde(default)]
    is_ebook: String,
    #[serde(default)]
    authors: Vec<AuthorReference>,
}

#[derive(Debug, Deserialize)]
struct AuthorReference {
    author_id: JsonId,
}

#[derive(Debug, Deserialize)]
struct AuthorRecord {
    author_id: JsonId,
    name: String,
}

/// Everything found in the JSON catalog, linked together.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub books: Vec<Book>,
    /// Distinct by id, in order of first appearance.
    pub authors: Vec<Author>,
    /// Distinct by name, without the unknown publisher.
    pub publishers: Vec<Publisher>,
}

pub struct BooksJsonReader {
    books_path: PathBuf,
    authors_path: PathBuf,
}

impl BooksJsonReader {
    pub fn new(books_path: impl Into<PathBuf>, authors_path: impl Into<PathBuf>) -> Self {
        Self {
            books_path: books_path.into(),
            authors_path: authors_path.into(),
        }
    }

    pub async fn read(&self) -> error_stack::Result<Catalog, KernelError> {
        let names = read_records::<AuthorRecord>(&self.authors_path)
            .await?
            .into_iter()
            .map(|record| -> error_stack::Result<_, KernelError> {
                Ok((record.author_id.value()?, record.name))
            })
            .collect::<error_stack::Result<HashMap<_, _>, KernelError>>()?;

        let mut catalog = Catalog::default();
        for record in read_records::<BookRecord>(&self.books_path).await? {
            let book = to_book(record, &names)?;
            for author in book.authors() {
                if !catalog.authors.contains(author) {
                    catalog.authors.push(author.clone());
                }
            }
            if let Some(publisher) = book.publisher() {
                if !catalog.publishers.contains(publisher) {
                    catalog.publishers.push(publisher.clone());
                }
            }
            catalog.books.push(book);
        }
        tracing::debug!(
            "read {} books by {} authors from {}",
            catalog.books.len(),
            catalog.authors.len(),
            self.books_path.display()
        );
        Ok(catalog)
    }
}

fn to_book(
    record: BookRecord,
    names: &HashMap<i64, String>,
) -> error_stack::Result<Book, KernelError> {
    let mut book = Book::from_raw(record.book_id.value()?, record.title)?;
    if !record.description.trim().is_empty() {
        book.set_description(record.description);
    }
    let publisher = Publisher::new(record.publisher);
    if !publisher.name().is_unknown() {
        book.set_publisher(Some(publisher));
    }
    book.set_release_year(
        parse_optional::<i32>(&record.publication_year)
            .map(ReleaseYear::new)
            .transpose()?,
    );
    book.set_num_pages(parse_optional::<i64>(&record.num_pages).and_then(PageCount::new));
    book.set_ebook(record.is_ebook.trim().eq_ignore_ascii_case("true"));
    for reference in record.authors {
        let id = reference.author_id.value()?;
        match names.get(&id) {
            Some(name) => book.add_author(Author::from_raw(id, name.as_str())?),
            None => tracing::warn!("author {} of {} has no name record, skipped", id, book),
        }
    }
    Ok(book)
}

fn parse_optional<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse::<T>().ok()
}

/// Accepts JSON lines as well as a single top-level array.
async fn read_records<T: DeserializeOwned>(
    path: &Path,
) -> error_stack::Result<Vec<T>, KernelError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .convert_error()
        .attach_printable_lazy(|| format!("cannot read {}", path.display()))?;
    parse_records(&content).attach_printable_lazy(|| format!("malformed {}", path.display()))
}

fn parse_records<T: DeserializeOwned>(content: &str) -> error_stack::Result<Vec<T>, KernelError> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).convert_error();
    }
    serde_json::Deserializer::from_str(content)
        .into_iter::<T>()
        .collect::<Result<Vec<_>, _>>()
        .convert_error()
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use kernel::prelude::entity::Publisher;
    use kernel::KernelError;

    use crate::importer::json::{parse_records, to_book, AuthorRecord, BookRecord};

    #[test]
    fn reads_lines_and_arrays() -> error_stack::Result<(), KernelError> {
        let lines = r#"
            {"author_id": "8551671", "name": "Lindsey Schussman"}
            {"author_id": 14965, "name": "Garth Ennis", "ratings_count": "12"}
        "#;
        let records = parse_records::<AuthorRecord>(lines)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].author_id.value()?, 8551671);
        assert_eq!(records[1].author_id.value()?, 14965);

        let array = r#"[{"author_id": "1", "name": "A"}, {"author_id": "2", "name": "B"}]"#;
        assert_eq!(parse_records::<AuthorRecord>(array)?.len(), 2);
        Ok(())
    }

    #[test]
    fn normalizes_a_goodreads_record() -> error_stack::Result<(), KernelError> {
        let line = r#"{"book_id": "27036537", "title": " Crossed, Volume 15 ",
            "description": "", "publisher": "Avatar Press", "publication_year": "2016",
            "num_pages": "", "is_ebook": "true",
            "authors": [{"author_id": "14965", "role": ""}, {"author_id": "404", "role": "Illustrator"}]}"#;
        let record = parse_records::<BookRecord>(line)?
            .pop()
            .expect("one record");
        let names = HashMap::from([(14965, "Garth Ennis".to_string())]);
        let book = to_book(record, &names)?;

        assert_eq!(book.to_string(), "<Book Crossed, Volume 15, book id = 27036537>");
        assert!(book.description().is_none());
        assert_eq!(book.publisher(), &Some(Publisher::new("Avatar Press")));
        assert_eq!(book.release_year().map(|year| year.to_string()), Some("2016".into()));
        assert!(book.num_pages().is_none());
        assert!(*book.ebook());
        assert_eq!(book.authors().len(), 1);
        Ok(())
    }

    #[test]
    fn blank_publisher_is_dropped() -> error_stack::Result<(), KernelError> {
        let line = r#"{"book_id": 1, "title": "The Switchblade Mamma", "publisher": " "}"#;
        let record = parse_records::<BookRecord>(line)?
            .pop()
            .expect("one record");
        let book = to_book(record, &HashMap::new())?;
        assert!(book.publisher().is_none());
        assert!(book.release_year().is_none());
        Ok(())
    }

    #[test]
    fn rejects_a_non_numeric_id() {
        let line = r#"{"book_id": "abc", "title": "Broken"}"#;
        let result = parse_records::<BookRecord>(line)
            .and_then(|mut records| to_book(records.remove(0), &HashMap::new()));
        let error = result.expect_err("id is not numeric");
        assert_eq!(error.current_context(), &KernelError::Validation);
    }
}
