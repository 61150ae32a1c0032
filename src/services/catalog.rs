//! Catalog management service

use crate::{
    error::AppResult,
    models::{Book, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books in store order
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Filter books on a free-text query. Relative order is preserved, so
    /// results come back in store (insertion) order.
    pub async fn search_books(&self, query: &str) -> AppResult<Vec<Book>> {
        let books = self.repository.books.list().await?;
        Ok(books.into_iter().filter(|book| book.matches(query)).collect())
    }

    /// Register a new book. It always starts out available; nothing about
    /// the request can make this fail short of a store error.
    pub async fn add_book(&self, book: CreateBook) -> AppResult<Book> {
        self.repository.books.add(book).await
    }
}
