//! Listing, category and product pages.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use lk_printers_integration_tests::{TestClient, test_app};

fn card_count(body: &str) -> usize {
    body.matches("class=\"product-card\"").count()
}

#[tokio::test]
async fn test_all_products_lists_whole_catalog() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/products").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(card_count(&resp.body), 30);
    assert!(resp.body.contains("<span class=\"result-count\">30</span>"));
}

#[tokio::test]
async fn test_listing_filters_by_category_and_query() {
    let mut client = TestClient::new(test_app());

    let apparel = client.get("/products?category=apparel").await;
    assert_eq!(card_count(&apparel.body), 4);

    let hoodies = client.get("/products?category=apparel&q=HOOD").await;
    assert_eq!(card_count(&hoodies.body), 1);
    assert!(hoodies.body.contains("Custom Hoodies"));
}

#[tokio::test]
async fn test_listing_query_is_not_trimmed() {
    let mut client = TestClient::new(test_app());

    let mugs = client.get("/products?q=mugs").await;
    assert!(card_count(&mugs.body) > 0);

    let trailing = client.get("/products?q=mugs%20").await;
    assert_eq!(card_count(&trailing.body), 0);

    let blank = client.get("/products?q=%20%20%20").await;
    assert_eq!(card_count(&blank.body), 0);
}

#[tokio::test]
async fn test_listing_accepts_short_aliases() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/products?category=calendars").await;
    assert_eq!(card_count(&resp.body), 3);
}

#[tokio::test]
async fn test_unknown_category_selects_everything() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/products?category=spaceships").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(card_count(&resp.body), 30);
}

#[tokio::test]
async fn test_no_results_message() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/products?q=zzzz").await;
    assert_eq!(card_count(&resp.body), 0);
    assert!(resp.body.contains("<span class=\"result-count\">0</span>"));
}

#[tokio::test]
async fn test_category_page_shows_only_its_products() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/apparel").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<h1>Custom Apparel</h1>"));
    assert_eq!(card_count(&resp.body), 4);
    assert!(resp.body.contains("Custom Hoodies"));
    assert!(!resp.body.contains("Premium Visiting Cards"));
}

#[tokio::test]
async fn test_category_page_search_and_list_view() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/photo-gifts?q=photo&view=list").await;
    assert!(resp.body.contains("product-grid--list"));
    // Photo Frames, Photo Prints and Photo Books match; Custom Photo Mugs too
    assert_eq!(card_count(&resp.body), 4);
}

#[tokio::test]
async fn test_product_page() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/product/8").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Custom Hoodies"));
    assert!(resp.body.contains("₹899"));
    assert!(resp.body.contains("₹1299"));
    assert!(resp.body.contains("31% OFF"));
}

#[tokio::test]
async fn test_unknown_product_page_is_not_found() {
    let mut client = TestClient::new(test_app());

    assert_eq!(client.get("/product/999").await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        client.get("/product/hoodie").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_home_page_sections() {
    let mut client = TestClient::new(test_app());

    let resp = client.get("/").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Begin 2026 in Style"));
    assert!(resp.body.contains("Rajesh Kumar"));
    assert_eq!(card_count(&resp.body), 8);
}
