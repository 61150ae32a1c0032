//! API handlers for the Seoga REST endpoints

pub mod books;
pub mod health;
pub mod loans;
pub mod openapi;
