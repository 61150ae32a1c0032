//! CSV codec for the loan store

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::Loan;

/// Loan column order, verbatim from the legacy export format
pub const HEADER: [&str; 4] = ["User ID", "Book ID", "대출일", "반납일"];

/// One loan row as stored on disk. An empty return date marks an open loan.
#[derive(Debug, Serialize, Deserialize)]
struct LoanRow {
    #[serde(rename = "User ID")]
    user_id: String,
    #[serde(rename = "Book ID")]
    book_id: String,
    #[serde(rename = "대출일")]
    loan_date: NaiveDate,
    #[serde(rename = "반납일")]
    return_date: Option<NaiveDate>,
}

impl From<LoanRow> for Loan {
    fn from(row: LoanRow) -> Self {
        Loan {
            user_id: row.user_id,
            book_id: row.book_id,
            loan_date: row.loan_date,
            return_date: row.return_date,
        }
    }
}

impl From<&Loan> for LoanRow {
    fn from(loan: &Loan) -> Self {
        LoanRow {
            user_id: loan.user_id.clone(),
            book_id: loan.book_id.clone(),
            loan_date: loan.loan_date,
            return_date: loan.return_date,
        }
    }
}

/// Read every loan row in file order
pub(crate) fn read_file(path: &Path) -> AppResult<Vec<Loan>> {
    let content = super::read_to_string_no_bom(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let mut loans = Vec::new();
    for row in reader.deserialize::<LoanRow>() {
        loans.push(Loan::from(row?));
    }
    Ok(loans)
}

/// Overwrite the loan store: header row first, then one row per loan event
pub(crate) fn write_file(path: &Path, loans: &[Loan]) -> AppResult<()> {
    let file = super::create_with_bom(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(HEADER)?;
    for loan in loans {
        writer.serialize(LoanRow::from(loan))?;
    }
    writer.flush()?;
    Ok(())
}
