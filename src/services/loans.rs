//! Loan management service

use chrono::Local;

use crate::{error::AppResult, models::Loan, repository::Repository};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book for the given user, dated today
    pub async fn borrow_book(&self, user_id: &str, book_id: &str) -> AppResult<Loan> {
        let today = Local::now().date_naive();
        self.repository.loans.borrow(user_id, book_id, today).await
    }

    /// Return a book for the given user, dated today
    pub async fn return_book(&self, user_id: &str, book_id: &str) -> AppResult<Loan> {
        let today = Local::now().date_naive();
        self.repository.loans.return_book(user_id, book_id, today).await
    }
}
