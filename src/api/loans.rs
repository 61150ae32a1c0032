//! Loan (borrow/return) endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::Loan};

/// Borrow request
#[derive(Debug, Deserialize, ToSchema)]
pub struct BorrowRequest {
    /// User ID
    pub user_id: String,
    /// Registration number of the book
    pub book_id: String,
}

/// Return request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReturnRequest {
    /// User ID
    pub user_id: String,
    /// Registration number of the book
    pub book_id: String,
}

/// Loan response with the affected record
#[derive(Serialize, ToSchema)]
pub struct LoanResponse {
    /// The loan record as stored
    pub loan: Loan,
    /// Status message
    pub message: String,
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = BorrowRequest,
    responses(
        (status = 201, description = "Book borrowed", body = LoanResponse),
        (status = 409, description = "Book already on loan or does not exist")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Json(request): Json<BorrowRequest>,
) -> AppResult<(StatusCode, Json<LoanResponse>)> {
    let loan = state
        .services
        .loans
        .borrow_book(&request.user_id, &request.book_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LoanResponse {
            message: format!("User {} borrowed book {}", loan.user_id, loan.book_id),
            loan,
        }),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/loans/return",
    tag = "loans",
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Book returned", body = LoanResponse),
        (status = 409, description = "Book not on loan or does not exist")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Json(request): Json<ReturnRequest>,
) -> AppResult<Json<LoanResponse>> {
    let loan = state
        .services
        .loans
        .return_book(&request.user_id, &request.book_id)
        .await?;

    Ok(Json(LoanResponse {
        message: format!("Book {} returned", loan.book_id),
        loan,
    }))
}
