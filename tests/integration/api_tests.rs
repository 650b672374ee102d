//! API integration tests
//!
//! These run against a live server with a fresh database and an existing
//! admin account (admin/admin).

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Register a throwaway user and return its token
async fn register_and_login(client: &Client, username: &str) -> String {
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "jo34r430d04j4dj3jdj2jd24d",
            "password_confirm": "jo34r430d04j4dj3jdj2jd24d",
            "first_name": "Test",
            "last_name": "Reader",
            "email": format!("{}@example.net", username),
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "jo34r430d04j4dj3jdj2jd24d"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn admin_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Create a priced book as admin and return its id
async fn create_book(client: &Client, token: &str, title: &str, price: &str) -> String {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": title,
            "volume": 1,
            "price": price
        }))
        .send()
        .await
        .expect("Failed to send create book request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse book response");
    body["id"].as_str().expect("No id in response").to_string()
}

async fn add_funds(client: &Client, token: &str, amount: &str) -> reqwest::Response {
    client
        .post(format!("{}/profile/funds", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "amount": amount }))
        .send()
        .await
        .expect("Failed to send add funds request")
}

async fn buy(client: &Client, token: &str, book_id: &str) -> Value {
    let response = client
        .post(format!("{}/buy?id={}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send buy request");
    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse buy response")
}

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
async fn test_register_starts_with_zero_balance() {
    let client = Client::new();
    let token = register_and_login(&client, "fresh_reader").await;

    let response = client
        .get(format!("{}/profile", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send profile request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse profile");
    assert_eq!(body["money"], "0.00");
    assert_eq!(body["holdings"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_register_invalid_password_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": "weak_reader",
            "password": "abc",
            "password_confirm": "abc",
            "first_name": "Test",
            "last_name": "Reader",
            "email": "weak_reader@example.net"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_catalog_writes_require_admin() {
    let client = Client::new();
    let token = register_and_login(&client, "plain_reader").await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "title": "A", "volume": 100 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_purchase_with_exact_funds() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let token = register_and_login(&client, "exact_buyer").await;
    let book_id = create_book(&client, &admin, "Exact Funds", "1.00").await;

    let response = add_funds(&client, &token, "1.00").await;
    assert!(response.status().is_success());

    let body = buy(&client, &token, &book_id).await;
    assert_eq!(body["outcome"], "purchased");
    assert_eq!(body["balance"], "0.00");
}

#[tokio::test]
#[ignore]
async fn test_purchase_without_funds() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let token = register_and_login(&client, "broke_buyer").await;
    let book_id = create_book(&client, &admin, "Too Expensive", "1.00").await;

    let body = buy(&client, &token, &book_id).await;
    assert_eq!(body["outcome"], "insufficient_funds");
    assert_eq!(body["balance"], "0.00");
}

#[tokio::test]
#[ignore]
async fn test_repeated_purchase_charges_once() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let token = register_and_login(&client, "eager_buyer").await;
    let book_id = create_book(&client, &admin, "Bought Twice", "1.00").await;

    add_funds(&client, &token, "2.00").await;

    let first = buy(&client, &token, &book_id).await;
    assert_eq!(first["outcome"], "purchased");

    let second = buy(&client, &token, &book_id).await;
    assert_eq!(second["outcome"], "already_owned");
    assert_eq!(second["balance"], "1.00");

    let response = client
        .get(format!("{}/profile", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send profile request");
    let body: Value = response.json().await.expect("Failed to parse profile");
    assert_eq!(body["money"], "1.00");
    assert_eq!(body["holdings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_add_negative_funds_rejected() {
    let client = Client::new();
    let token = register_and_login(&client, "negative_funder").await;

    let response = add_funds(&client, &token, "-1.00").await;
    assert_eq!(response.status(), 400);

    let response = client
        .get(format!("{}/profile", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send profile request");
    let body: Value = response.json().await.expect("Failed to parse profile");
    assert_eq!(body["money"], "0.00");
}

#[tokio::test]
#[ignore]
async fn test_buy_unknown_book_redirects_to_listing() {
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client");
    let token = register_and_login(&client, "lost_buyer").await;

    let response = client
        .get(format!("{}/buy?id={}", BASE_URL, uuid::Uuid::new_v4()))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/api/v1/books"
    );
}

#[tokio::test]
#[ignore]
async fn test_book_validation_rejects_future_year() {
    let client = Client::new();
    let admin = admin_token(&client).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "title": "From The Future", "volume": 1, "year": 3000 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}
