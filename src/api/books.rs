//! Book catalog endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{Book, CreateBook},
};

/// Fixed page size of the browse view
pub const PAGE_SIZE: usize = 30;

#[derive(Debug, Deserialize)]
pub struct BookQuery {
    /// Free-text search over all six book fields
    pub q: Option<String>,
    /// 1-based page number
    pub page: Option<usize>,
}

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// One page of results
    pub items: Vec<T>,
    /// Total number of matches before paging
    pub total: usize,
    /// Current page number
    pub page: usize,
    /// Items per page
    pub per_page: usize,
    /// Set when the query matched nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Create book response
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    /// The book as stored
    pub book: Book,
    /// Status message
    pub message: String,
}

/// Browse or search the catalog with fixed-size pages
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("q" = Option<String>, Query, description = "Free-text search over library, room, registration number, title, author and publisher"),
        ("page" = Option<usize>, Query, description = "Page number (default: 1)")
    ),
    responses(
        (status = 200, description = "One page of matching books", body = PaginatedResponse<Book>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<PaginatedResponse<Book>>> {
    let q = query.q.unwrap_or_default();
    let matches = state.services.catalog.search_books(&q).await?;

    let total = matches.len();
    let page = query.page.unwrap_or(1).max(1);
    let items: Vec<Book> = matches
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    let message = if total == 0 {
        Some("No books matched the search".to_string())
    } else {
        None
    };

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page: PAGE_SIZE,
        message,
    }))
}

/// Add a new book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book added", body = BookResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state.services.catalog.add_book(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            message: format!("Book \"{}\" added to the catalog", book.title),
            book,
        }),
    ))
}
