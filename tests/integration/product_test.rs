//! Product endpoint integration tests.

mod helpers;

use std::sync::Arc;

use axum::http::{Method, StatusCode, header};
use serde_json::json;

use catalog_core::traits::repository::Repository;
use catalog_entity::Product;
use catalog_search::ProductRepository;

use helpers::{FailingBackend, TestApp};

async fn seed(app: &TestApp, products: &[Product]) {
    let repo = ProductRepository::for_products(app.search.backend(), &app.config.search);
    assert!(repo.add_bulk(products).await);
}

fn catalog() -> Vec<Product> {
    vec![
        Product::with_id("p1").name("Blue Phone").price(199.0),
        Product::with_id("p2").name("Laptop").price(999.0),
        Product::with_id("p3").name("Headphones").price(49.5),
        Product::with_id("p4").name("Phone Case").price(9.99),
    ]
}

#[tokio::test]
async fn test_product_lifecycle() {
    let app = TestApp::new();

    let created = app
        .request(
            Method::POST,
            "/products",
            Some(json!({ "id": "p1", "name": "Widget", "price": 9.99 })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.headers.get(header::LOCATION).unwrap(), "/products/p1");
    assert_eq!(created.body["name"], "Widget");

    let fetched = app.get("/products/p1").await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["id"], "p1");
    assert_eq!(fetched.body["price"], 9.99);

    let updated = app
        .request(Method::PUT, "/products/p1", Some(json!({ "price": 12.99 })))
        .await;
    assert_eq!(updated.status, StatusCode::NO_CONTENT);

    let fetched = app.get("/products/p1").await;
    assert_eq!(fetched.body["price"], 12.99);
    assert_eq!(fetched.body["name"], "Widget");

    let deleted = app.request(Method::DELETE, "/products/p1", None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let missing = app.get("/products/p1").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_assigns_id() {
    let app = TestApp::new();

    let created = app
        .request(Method::POST, "/products", Some(json!({ "name": "Gadget" })))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let id = created.body["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert!(created.body["createdAt"].is_string());
    assert_eq!(
        created.headers.get(header::LOCATION).unwrap(),
        format!("/products/{id}").as_str()
    );

    let fetched = app.get(&format!("/products/{id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_without_name_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .request(Method::POST, "/products", Some(json!({ "price": 5.0 })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers.get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
    assert_eq!(response.body["status"], 400);
}

#[tokio::test]
async fn test_create_with_unencodable_id_is_rejected_without_writing() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/products",
            Some(json!({ "id": "a\u{1}b", "name": "Widget" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers.get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );

    let repo = ProductRepository::for_products(app.search.backend(), &app.config.search);
    assert!(!repo.exists("a\u{1}b").await);
}

#[tokio::test]
async fn test_get_missing_product_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/products/nope").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["title"], "Not Found");
}

#[tokio::test]
async fn test_update_missing_product_is_problem() {
    let app = TestApp::new();

    let response = app
        .request(Method::PUT, "/products/nope", Some(json!({ "price": 1.0 })))
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["detail"], "Unable to update product.");
}

#[tokio::test]
async fn test_delete_missing_product_is_problem() {
    let app = TestApp::new();

    let response = app.request(Method::DELETE, "/products/nope", None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["detail"], "Unable to delete product.");
}

#[tokio::test]
async fn test_list_defaults_to_first_page() {
    let app = TestApp::new();
    seed(&app, &catalog()).await;

    let response = app.get("/products").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["pageNumber"], 1);
    assert_eq!(response.body["pageSize"], 10);
    assert_eq!(response.body["totalCount"], 4);
    assert_eq!(response.body["totalPages"], 1);
    assert_eq!(response.body["hasPreviousPage"], false);
    assert_eq!(response.body["hasNextPage"], false);
    assert_eq!(response.body["items"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_list_searches_and_sorts() {
    let app = TestApp::new();
    seed(&app, &catalog()).await;

    let response = app
        .get("/products?searchString=phone&sortBy=name%20desc")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalCount"], 3);

    let names: Vec<&str> = response.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Phone Case", "Headphones", "Blue Phone"]);
}

#[tokio::test]
async fn test_list_pages() {
    let app = TestApp::new();
    seed(&app, &catalog()).await;

    let response = app.get("/products?pageNumber=2&pageSize=3&sortBy=price").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["pageNumber"], 2);
    assert_eq!(response.body["totalPages"], 2);
    assert_eq!(response.body["hasPreviousPage"], true);
    assert_eq!(response.body["hasNextPage"], false);

    let items = response.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "p2");
}

#[tokio::test]
async fn test_list_rejects_invalid_paging() {
    let app = TestApp::new();

    let response = app.get("/products?pageNumber=0").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.get("/products?pageSize=abc").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_rejects_page_beyond_addressable_range() {
    let app = TestApp::new();
    seed(&app, &catalog()).await;

    let response = app
        .get("/products?pageNumber=18446744073709551615&pageSize=10")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["status"], 400);
}

#[tokio::test]
async fn test_backend_failure_surfaces_as_problem() {
    let app = TestApp::with_backend(Arc::new(FailingBackend));

    let created = app
        .request(Method::POST, "/products", Some(json!({ "name": "Widget" })))
        .await;
    assert_eq!(created.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(created.body["detail"], "Unable to add product.");

    let fetched = app.get("/products/p1").await;
    assert_eq!(fetched.status, StatusCode::SERVICE_UNAVAILABLE);

    let listed = app.get("/products").await;
    assert_eq!(listed.status, StatusCode::SERVICE_UNAVAILABLE);
}
