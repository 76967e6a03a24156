//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use catalog_api::{AppState, build_app};
use catalog_core::config::AppConfig;
use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::search_backend::{BulkResponse, SearchBackend, SearchHits};
use catalog_core::types::query::{SearchQuery, SearchRequest};
use catalog_search::SearchClient;
use catalog_search::backends::MemoryBackend;

/// Response captured by [`TestApp::request`].
pub struct TestResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// JSON body, `Value::Null` when empty.
    pub body: Value,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Search client shared with the router
    pub search: SearchClient,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// A test application over an empty in-memory backend.
    pub fn new() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()))
    }

    /// A test application over the given backend.
    pub fn with_backend(backend: Arc<dyn SearchBackend>) -> Self {
        let config = AppConfig::default();
        let search = SearchClient::from_backend(backend);
        let router = build_app(AppState::new(config.clone(), search.clone()));
        Self {
            router,
            search,
            config,
        }
    }

    /// Send a request through the full middleware stack.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// GET helper.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }
}

/// A backend whose every call fails as if the cluster were unreachable.
#[derive(Debug, Default)]
pub struct FailingBackend;

fn unreachable_cluster() -> AppError {
    AppError::service_unavailable("Failed to reach search cluster: connection refused")
}

#[async_trait]
impl SearchBackend for FailingBackend {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn index_document(&self, _: &str, _: &str, _: Value) -> AppResult<()> {
        Err(unreachable_cluster())
    }

    async fn bulk_index(&self, _: &str, _: Vec<(String, Value)>) -> AppResult<BulkResponse> {
        Err(unreachable_cluster())
    }

    async fn get_document(&self, _: &str, _: &str) -> AppResult<Option<Value>> {
        Err(unreachable_cluster())
    }

    async fn search(&self, _: &str, _: &SearchRequest) -> AppResult<SearchHits> {
        Err(unreachable_cluster())
    }

    async fn delete_document(&self, _: &str, _: &str) -> AppResult<()> {
        Err(unreachable_cluster())
    }

    async fn delete_by_query(&self, _: &str, _: &SearchQuery) -> AppResult<u64> {
        Err(unreachable_cluster())
    }

    async fn document_exists(&self, _: &str, _: &str) -> AppResult<bool> {
        Err(unreachable_cluster())
    }

    async fn update_document(&self, _: &str, _: &str, _: Value) -> AppResult<()> {
        Err(unreachable_cluster())
    }

    async fn count(&self, _: &str) -> AppResult<u64> {
        Err(unreachable_cluster())
    }

    async fn ping(&self) -> AppResult<bool> {
        Err(unreachable_cluster())
    }
}
