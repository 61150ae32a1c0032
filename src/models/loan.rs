//! Loan (borrow event) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One loan event. Records are append-only: a return fills in
/// `return_date`, it never deletes the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Loan {
    pub user_id: String,
    /// Registration number of the borrowed book
    pub book_id: String,
    pub loan_date: NaiveDate,
    /// `None` while the book is still out
    pub return_date: Option<NaiveDate>,
}

impl Loan {
    /// An open loan is one whose return date has not been recorded yet
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}
