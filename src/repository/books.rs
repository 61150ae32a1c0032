//! Catalog access and mutation

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{Book, CreateBook, LoanStatus};

use super::Shared;

#[derive(Clone)]
pub struct BooksRepository {
    shared: Arc<Shared>,
}

impl BooksRepository {
    pub(super) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// All books in store order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let mut state = self.shared.state.lock().await;
        let (books, _) = self.shared.loaded(&mut state)?;
        Ok(books.clone())
    }

    /// Append a new book and rewrite the catalog store. The new entry always
    /// starts out available. Registration numbers are not checked for
    /// uniqueness; duplicates are accepted silently.
    pub async fn add(&self, create: CreateBook) -> AppResult<Book> {
        let mut state = self.shared.state.lock().await;
        let (books, _) = self.shared.loaded(&mut state)?;

        let book = Book {
            library_name: create.library_name,
            room: create.room,
            registration_number: create.registration_number,
            title: create.title,
            author: create.author,
            publisher: create.publisher,
            loan_status: LoanStatus::Available,
        };
        books.push(book.clone());
        self.shared.backend.save_books(books)?;

        tracing::info!(registration_number = %book.registration_number, title = %book.title, "book added");
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{CreateBook, LoanStatus};
    use crate::repository::testing::{fresh_store, repository_with, BOOKS_HEADER, LOANS_HEADER};
    use crate::repository::Repository;
    use crate::storage::{MockStoreBackend, StoreBackend};

    fn create(reg: &str, title: &str) -> CreateBook {
        CreateBook {
            library_name: "중앙도서관".to_string(),
            room: "종합자료실".to_string(),
            registration_number: reg.to_string(),
            title: title.to_string(),
            author: "저자".to_string(),
            publisher: "출판사".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_persists_and_updates_cache() {
        let (dir, repository) = repository_with(BOOKS_HEADER, LOANS_HEADER);

        let book = repository.books.add(create("100", "데미안")).await.expect("add");
        assert_eq!(book.loan_status, LoanStatus::Available);

        // visible through the cache
        let cached = repository.books.list().await.expect("list");
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0], book);

        // and in the rewritten file
        let reloaded = fresh_store(&dir).load_books().expect("reload");
        assert_eq!(reloaded, vec![book]);
    }

    #[tokio::test]
    async fn test_duplicate_registration_numbers_are_accepted() {
        let (_dir, repository) = repository_with(BOOKS_HEADER, LOANS_HEADER);

        repository.books.add(create("100", "데미안")).await.expect("first add");
        repository.books.add(create("100", "데미안 2판")).await.expect("second add");

        let books = repository.books.list().await.expect("list");
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].registration_number, books[1].registration_number);
    }

    #[tokio::test]
    async fn test_load_resets_stored_status_to_available() {
        let books_csv = format!(
            "{BOOKS_HEADER}중앙도서관,종합자료실,100,데미안,헤세,민음사,대출중\n"
        );
        let (_dir, repository) = repository_with(&books_csv, LOANS_HEADER);

        let books = repository.books.list().await.expect("list");
        assert_eq!(books[0].loan_status, LoanStatus::Available);
    }

    #[tokio::test]
    async fn test_reload_is_idempotent_backend_read_once() {
        let mut backend = MockStoreBackend::new();
        backend.expect_load_books().times(1).returning(|| Ok(Vec::new()));
        backend.expect_load_loans().times(1).returning(|| Ok(Vec::new()));

        let repository = Repository::new(Box::new(backend), false);
        let first = repository.books.list().await.expect("first list");
        let second = repository.books.list().await.expect("second list");
        assert_eq!(first, second);
        // the mock panics if either load runs a second time
    }
}
