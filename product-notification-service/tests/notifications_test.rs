//! `GET /notifications` integration tests over an in-memory catalog.

mod common;

use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn empty_catalog_returns_empty_array() {
    let (app, _source) = TestApp::spawn().await;

    let response = app.get_notifications().await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn newest_product_becomes_notification() {
    let (app, source) = TestApp::spawn().await;
    source.add(3, "Hammer", "Heavy", "Tools").await;
    source.add(10, "Widget", "A small widget", "Tools").await;

    let response = app.get_notifications().await;

    assert_eq!(response.status(), 200);
    let body: Vec<serde_json::Value> = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["type"], "product");
    assert_eq!(body[0]["title"], "New Product: Widget");
    assert_eq!(body[0]["message"], "A small widget (Tools)");
    assert_eq!(body[1]["title"], "New Product: Hammer");
    assert_eq!(body[1]["message"], "Heavy (Tools)");
}

#[tokio::test]
async fn lists_five_most_recent_in_descending_order() {
    let (app, source) = TestApp::spawn().await;
    for id in 1..=7 {
        source
            .add(id, &format!("Product {id}"), "Description", "Category")
            .await;
    }

    let body: Vec<serde_json::Value> = app
        .get_notifications()
        .await
        .json()
        .await
        .expect("Failed to parse JSON");

    let titles: Vec<&str> = body.iter().map(|n| n["title"].as_str().unwrap()).collect();
    assert_eq!(
        titles,
        vec![
            "New Product: Product 7",
            "New Product: Product 6",
            "New Product: Product 5",
            "New Product: Product 4",
            "New Product: Product 3",
        ]
    );
}

#[tokio::test]
async fn notifications_share_query_timestamp() {
    let (app, source) = TestApp::spawn().await;
    source.add(1, "A", "a", "x").await;
    source.add(2, "B", "b", "y").await;

    let body: Vec<serde_json::Value> = app
        .get_notifications()
        .await
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["timestamp"], body[1]["timestamp"]);
    let timestamp = body[0]["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn storage_failure_returns_500_with_fixed_message() {
    let (app, source) = TestApp::spawn().await;
    source.add(1, "Widget", "A small widget", "Tools").await;
    source.set_failing(true);

    let response = app.get_notifications().await;

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "error": "Failed to load product notifications" }));
}

#[tokio::test]
async fn recovers_after_storage_comes_back() {
    let (app, source) = TestApp::spawn().await;
    source.add(1, "Widget", "A small widget", "Tools").await;

    source.set_failing(true);
    assert_eq!(app.get_notifications().await.status(), 500);

    source.set_failing(false);
    let response = app.get_notifications().await;
    assert_eq!(response.status(), 200);
    let body: Vec<serde_json::Value> = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body.len(), 1);
}
