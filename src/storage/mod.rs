//! Flat-file persistence for the catalog and loan stores.
//!
//! Each store is a headered, comma-delimited UTF-8 file. Files written by
//! the legacy exporter carry a byte-order marker, so loads tolerate one and
//! saves emit one. Every save is a full-file rewrite: header row first, then
//! one row per record, with no atomicity guarantee.

pub mod books;
pub mod loans;

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AppResult;
use crate::models::{Book, Loan};

/// Storage interface for the two record sets. Operation logic only ever
/// talks to this trait, so the full-rewrite store can be swapped out without
/// touching it.
#[cfg_attr(test, mockall::automock)]
pub trait StoreBackend {
    fn load_books(&self) -> AppResult<Vec<Book>>;
    fn save_books(&self, books: &[Book]) -> AppResult<()>;
    fn load_loans(&self) -> AppResult<Vec<Loan>>;
    fn save_loans(&self, loans: &[Loan]) -> AppResult<()>;
}

/// The flat-file store: one CSV file per record set
pub struct CsvStore {
    books_path: PathBuf,
    loans_path: PathBuf,
}

impl CsvStore {
    pub fn new(books_path: impl Into<PathBuf>, loans_path: impl Into<PathBuf>) -> Self {
        Self {
            books_path: books_path.into(),
            loans_path: loans_path.into(),
        }
    }
}

impl StoreBackend for CsvStore {
    fn load_books(&self) -> AppResult<Vec<Book>> {
        books::read_file(&self.books_path)
    }

    fn save_books(&self, books: &[Book]) -> AppResult<()> {
        books::write_file(&self.books_path, books)
    }

    fn load_loans(&self) -> AppResult<Vec<Loan>> {
        loans::read_file(&self.loans_path)
    }

    fn save_loans(&self, loans: &[Loan]) -> AppResult<()> {
        loans::write_file(&self.loans_path, loans)
    }
}

const UTF8_BOM: &str = "\u{feff}";

/// Read a whole store file, dropping a leading byte-order marker if present
pub(crate) fn read_to_string_no_bom(path: &Path) -> AppResult<String> {
    let raw = std::fs::read_to_string(path)?;
    match raw.strip_prefix(UTF8_BOM) {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(raw),
    }
}

/// Create (truncate) a store file and write the byte-order marker
pub(crate) fn create_with_bom(path: &Path) -> AppResult<File> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM.as_bytes())?;
    Ok(file)
}
