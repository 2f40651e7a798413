//! API integration tests
//!
//! These run against a live server backed by a migrated database:
//! `cargo test --test api_tests -- --ignored`

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:3000";

/// Helper to create an author and return its id
async fn create_author(client: &Client, name: &str) -> String {
    let response = client
        .post(format!("{}/author/", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_str().expect("No id in response").to_string()
}

/// Helper to create a book and return its id
async fn create_book(client: &Client, title: &str, author_id: &str) -> String {
    let response = client
        .post(format!("{}/book/", BASE_URL))
        .json(&json!({ "title": title, "authorId": author_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_str().expect("No id in response").to_string()
}

async fn get(client: &Client, path: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let (status, body) = get(&client, "/health").await;
    assert!(status.is_success());
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_author_lifecycle() {
    let client = Client::new();
    let name = format!("Author {}", Uuid::new_v4());
    let id = create_author(&client, &name).await;

    let (status, body) = get(&client, &format!("/author/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], name);
    assert_eq!(body["booksCount"], 0);
    assert!(body.get("deleted").is_none());

    let response = client
        .patch(format!("{}/author/{}", BASE_URL, id))
        .json(&json!({ "name": format!("{} (revised)", name) }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], format!("{} (revised)", name));

    let response = client
        .delete(format!("{}/author/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, body) = get(&client, &format!("/author/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let response = client
        .delete(format!("{}/author/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_search_and_pagination() {
    let client = Client::new();
    let marker = Uuid::new_v4().simple().to_string();
    for i in 0..3 {
        create_author(&client, &format!("Paged {} {}", marker, i)).await;
    }

    let (status, body) = get(&client, &format!("/author/?q={}&page=2&limit=2", marker.to_uppercase())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["hasNextPage"], false);
    assert_eq!(body["hasPrevPage"], true);
    assert_eq!(body["result"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["result"][0]["name"], format!("Paged {} 2", marker));

    let (status, body) = get(&client, &format!("/author/?q={}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["totalPages"], 0);
    assert_eq!(body["result"], json!([]));
}

#[tokio::test]
#[ignore]
async fn test_invalid_paging_is_rejected() {
    let client = Client::new();

    for path in ["/author/?page=0", "/book/?limit=abc"] {
        let (status, body) = get(&client, path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
#[ignore]
async fn test_book_lifecycle() {
    let client = Client::new();
    let author_id = create_author(&client, "Book Author").await;
    let book_id = create_book(&client, "First Title", &author_id).await;

    let (status, body) = get(&client, &format!("/book/{}", book_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "First Title");
    assert_eq!(body["authorId"], author_id);
    assert_eq!(body["author"]["name"], "Book Author");

    let (_, body) = get(&client, &format!("/author/{}", author_id)).await;
    assert_eq!(body["booksCount"], 1);

    let (status, body) = get(&client, &format!("/book/?authorId={}", author_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let response = client
        .patch(format!("{}/book/{}", BASE_URL, book_id))
        .json(&json!({ "title": "Second Title" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Second Title");
    assert_eq!(body["authorId"], author_id);

    let response = client
        .delete(format!("{}/book/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (_, body) = get(&client, &format!("/author/{}", author_id)).await;
    assert_eq!(body["booksCount"], 0);
}

#[tokio::test]
#[ignore]
async fn test_book_requires_live_author() {
    let client = Client::new();

    let response = client
        .post(format!("{}/book/", BASE_URL))
        .json(&json!({ "title": "Orphan", "authorId": Uuid::new_v4() }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Author not found");

    let response = client
        .post(format!("{}/book/", BASE_URL))
        .json(&json!({ "authorId": Uuid::new_v4() }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_author_delete_cascades_to_books() {
    let client = Client::new();
    let author_id = create_author(&client, "Cascading Author").await;
    let book_id = create_book(&client, "Cascaded Book", &author_id).await;

    let response = client
        .delete(format!("{}/author/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = get(&client, &format!("/book/{}", book_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
