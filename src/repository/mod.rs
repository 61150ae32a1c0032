//! Repository layer over the flat-file stores.
//!
//! Both record sets are read from disk on first access and cached for the
//! rest of the process lifetime; only a restart picks up external edits to
//! the files. A single async mutex guards the cache, so every operation's
//! read-modify-persist cycle runs one at a time.

pub mod books;
pub mod loans;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::models::{Book, Loan, LoanStatus};
use crate::storage::StoreBackend;

/// Cached record sets. `None` until the first load.
#[derive(Default)]
struct CacheState {
    books: Option<Vec<Book>>,
    loans: Option<Vec<Loan>>,
}

/// State shared by the per-entity repositories
struct Shared {
    backend: Box<dyn StoreBackend + Send + Sync>,
    reconcile_on_load: bool,
    state: Mutex<CacheState>,
}

impl Shared {
    /// Load both record sets on first access and hand out the cache.
    /// Later calls reuse the cache without touching the backend.
    fn loaded<'a>(
        &self,
        state: &'a mut CacheState,
    ) -> AppResult<(&'a mut Vec<Book>, &'a mut Vec<Loan>)> {
        if state.loans.is_none() {
            state.loans = Some(self.backend.load_loans()?);
        }
        if state.books.is_none() {
            let mut books = self.backend.load_books()?;
            if self.reconcile_on_load {
                if let Some(loans) = state.loans.as_ref() {
                    reconcile_statuses(&mut books, loans);
                }
            } else {
                // Legacy behavior: persisted status is not trusted, every
                // book comes up available until a borrow corrects it.
                for book in &mut books {
                    book.loan_status = LoanStatus::Available;
                }
            }
            state.books = Some(books);
        }
        match (&mut state.books, &mut state.loans) {
            (Some(books), Some(loans)) => Ok((books, loans)),
            _ => Err(AppError::Internal("record cache failed to load".to_string())),
        }
    }
}

/// Derive each book's status from the loan log, warning on every stored
/// value that disagrees
fn reconcile_statuses(books: &mut [Book], loans: &[Loan]) {
    for book in books {
        let open = loans
            .iter()
            .any(|loan| loan.book_id == book.registration_number && loan.is_open());
        let derived = if open {
            LoanStatus::OnLoan
        } else {
            LoanStatus::Available
        };
        if book.loan_status != derived {
            tracing::warn!(
                registration_number = %book.registration_number,
                stored = %book.loan_status,
                derived = %derived,
                "stored loan status disagrees with the loan log; using the derived value"
            );
            book.loan_status = derived;
        }
    }
}

/// Main repository struct holding the shared store
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    /// Create a new repository over the given storage backend
    pub fn new(backend: Box<dyn StoreBackend + Send + Sync>, reconcile_on_load: bool) -> Self {
        let shared = Arc::new(Shared {
            backend,
            reconcile_on_load,
            state: Mutex::new(CacheState::default()),
        });
        Self {
            books: books::BooksRepository::new(shared.clone()),
            loans: loans::LoansRepository::new(shared),
        }
    }
}
