//! CSV codec for the catalog store

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::{Book, LoanStatus};

/// Catalog column order. Header names are kept verbatim from the legacy
/// export format.
pub const HEADER: [&str; 7] = [
    "도서관명",
    "자료실",
    "등록번호",
    "서명",
    "저자",
    "출판사",
    "대출상태",
];

/// One catalog row as stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct BookRow {
    #[serde(rename = "도서관명")]
    library_name: String,
    #[serde(rename = "자료실")]
    room: String,
    #[serde(rename = "등록번호")]
    registration_number: String,
    #[serde(rename = "서명")]
    title: String,
    #[serde(rename = "저자")]
    author: String,
    #[serde(rename = "출판사")]
    publisher: String,
    #[serde(rename = "대출상태")]
    loan_status: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            library_name: row.library_name,
            room: row.room,
            registration_number: row.registration_number,
            title: row.title,
            author: row.author,
            publisher: row.publisher,
            loan_status: LoanStatus::from_record(&row.loan_status),
        }
    }
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        BookRow {
            library_name: book.library_name.clone(),
            room: book.room.clone(),
            registration_number: book.registration_number.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            publisher: book.publisher.clone(),
            loan_status: book.loan_status.as_record().to_string(),
        }
    }
}

/// Read every book row in file order
pub(crate) fn read_file(path: &Path) -> AppResult<Vec<Book>> {
    let content = super::read_to_string_no_bom(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let mut books = Vec::new();
    for row in reader.deserialize::<BookRow>() {
        books.push(Book::from(row?));
    }
    Ok(books)
}

/// Overwrite the catalog store: header row first, then one row per book
pub(crate) fn write_file(path: &Path, books: &[Book]) -> AppResult<()> {
    let file = super::create_with_bom(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(HEADER)?;
    for book in books {
        writer.serialize(BookRow::from(book))?;
    }
    writer.flush()?;
    Ok(())
}
