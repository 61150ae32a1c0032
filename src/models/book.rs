//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Whether a catalog entry can currently be borrowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Available,
    OnLoan,
}

impl LoanStatus {
    /// Legacy status token used in the catalog store
    pub fn as_record(&self) -> &'static str {
        match self {
            LoanStatus::Available => "대출가능",
            LoanStatus::OnLoan => "대출중",
        }
    }

    /// Parse a stored status token. Anything other than the on-loan token
    /// reads as available.
    pub fn from_record(value: &str) -> Self {
        if value.trim() == "대출중" {
            LoanStatus::OnLoan
        } else {
            LoanStatus::Available
        }
    }
}

impl Default for LoanStatus {
    fn default() -> Self {
        LoanStatus::Available
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LoanStatus::Available => "available",
            LoanStatus::OnLoan => "on_loan",
        };
        write!(f, "{}", label)
    }
}

/// One book in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub library_name: String,
    pub room: String,
    /// Lookup key for borrow and return. Uniqueness is by convention only;
    /// nothing enforces it.
    pub registration_number: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub loan_status: LoanStatus,
}

impl Book {
    /// Case-insensitive substring match against the six textual fields.
    /// The empty query matches every book.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        [
            &self.library_name,
            &self.room,
            &self.registration_number,
            &self.title,
            &self.author,
            &self.publisher,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBook {
    pub library_name: String,
    pub room: String,
    pub registration_number: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
}
