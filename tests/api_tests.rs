//! API integration tests.
//!
//! These run against a live server (`cargo run`) pointed at a scratch copy
//! of the data files, since every mutation rewrites the stores.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
    assert_eq!(body["per_page"], 30);
}

#[tokio::test]
#[ignore]
async fn test_search_with_no_match_reports_message() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books?q=zz-no-such-book", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 0);
    assert!(body["message"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_add_book() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "library_name": "중앙도서관",
            "room": "종합자료실",
            "registration_number": "IT9900001",
            "title": "Integration Test Book",
            "author": "Tester",
            "publisher": "None"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book"]["loan_status"], "available");
    assert!(body["message"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_cycle() {
    let client = Client::new();

    // register a dedicated book so the test is self-contained
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "library_name": "중앙도서관",
            "room": "종합자료실",
            "registration_number": "IT9900002",
            "title": "Circulation Test Book",
            "author": "Tester",
            "publisher": "None"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // borrow it
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({"user_id": "it-user", "book_id": "IT9900002"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["loan"]["return_date"].is_null());

    // a second borrow is refused with the generic warning
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({"user_id": "other-user", "book_id": "IT9900002"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // return it
    let response = client
        .post(format!("{}/loans/return", BASE_URL))
        .json(&json!({"user_id": "it-user", "book_id": "IT9900002"}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["loan"]["return_date"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_borrow_unknown_book_is_conflict() {
    let client = Client::new();

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({"user_id": "it-user", "book_id": "ZZ0000000"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .expect("message")
        .contains("already on loan or does not exist"));
}
