//! Handler tests for Users domain
//!
//! These tests drive the users router with the in-memory repository:
//! - Request deserialization and validation
//! - Response bodies and HTTP status codes
//! - Error responses
//!
//! They exercise only the users domain router, not the full application.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::ErrorResponse;
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let service = UserService::new(InMemoryUserRepository::new());
    handlers::router(service)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn ada() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "password": "s3cret"
    })
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = app();

    // Create
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", ada()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created: User = json_body(response.into_body()).await;
    assert_eq!(created.first_name, "Ada");
    assert_eq!(created.last_name, "Lovelace");

    let uri = format!("/{}", created.id);

    // Fetch
    let response = app
        .clone()
        .oneshot(empty_request("GET", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: User = json_body(response.into_body()).await;
    assert_eq!(fetched, created);

    // Update last name
    let mut changed = ada();
    changed["lastName"] = json!("King");
    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, changed))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    let response = app
        .clone()
        .oneshot(empty_request("GET", &uri))
        .await
        .unwrap();
    let updated: User = json_body(response.into_body()).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.last_name, "King");
    assert_eq!(updated.first_name, "Ada");

    // Delete
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "User not found");
}

#[tokio::test]
async fn test_list_users_empty() {
    let response = app().oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<User> = json_body(response.into_body()).await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_list_users_in_creation_order() {
    let app = app();
    for first_name in ["Ada", "Grace"] {
        let mut body = ada();
        body["firstName"] = json!(first_name);
        app.clone()
            .oneshot(json_request("POST", "/", body))
            .await
            .unwrap();
    }

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    let users: Vec<User> = json_body(response.into_body()).await;

    let names: Vec<&str> = users.iter().map(|u| u.first_name.as_str()).collect();
    assert_eq!(names, ["Ada", "Grace"]);
    assert!(users[0].id < users[1].id);
}

#[tokio::test]
async fn test_get_unknown_user_returns_404() {
    let response = app().oneshot(empty_request("GET", "/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "NOT_FOUND");
    assert_eq!(error.message, "User not found");
}

#[tokio::test]
async fn test_update_unknown_user_returns_404() {
    let app = app();
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/999", ada()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Nothing was written
    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    let users: Vec<User> = json_body(response.into_body()).await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_delete_unknown_user_returns_204() {
    let response = app()
        .oneshot(empty_request("DELETE", "/999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_non_numeric_id_returns_400() {
    let response = app().oneshot(empty_request("GET", "/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "INVALID_ID");
}

#[tokio::test]
async fn test_create_validates_input() {
    let mut body = ada();
    body["firstName"] = json!("");
    body["email"] = json!("not-an-email");

    let response = app()
        .oneshot(json_request("POST", "/", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "VALIDATION_ERROR");
    let details = error.details.unwrap();
    assert!(details.get("firstName").is_some());
    assert!(details.get("email").is_some());
    assert!(details.get("first_name").is_none());
}

#[tokio::test]
async fn test_create_missing_field_is_rejected() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com" }),
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.error, "JSON_EXTRACTION");
}
