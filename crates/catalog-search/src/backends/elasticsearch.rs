//! Elasticsearch backend.
//!
//! Request bodies and response parsing are plain functions over JSON so
//! they can be checked without a cluster.

use std::fmt::Debug;

use async_trait::async_trait;
use elasticsearch::http::response::Response;
use elasticsearch::params::Refresh;
use elasticsearch::{
    BulkOperation, BulkOperations, BulkParts, CountParts, DeleteByQueryParts, DeleteParts,
    Elasticsearch, ExistsParts, GetParts, IndexParts, SearchParts, UpdateParts,
};
use serde_json::{Map, Value, json};
use tracing::debug;

use catalog_core::config::search::{RefreshPolicy, SearchConfig};
use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_core::traits::search_backend::{
    BulkItemFailure, BulkResponse, SearchBackend, SearchHits,
};
use catalog_core::types::query::{SearchQuery, SearchRequest};

/// Search backend talking to an Elasticsearch cluster over HTTP.
#[derive(Clone)]
pub struct ElasticsearchBackend {
    client: Elasticsearch,
    refresh: RefreshPolicy,
}

impl Debug for ElasticsearchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchBackend")
            .field("refresh", &self.refresh)
            .finish_non_exhaustive()
    }
}

impl ElasticsearchBackend {
    /// Build a backend from configuration. No request is sent.
    pub fn new(config: &SearchConfig) -> AppResult<Self> {
        Ok(Self {
            client: crate::connection::connect(config)?,
            refresh: config.refresh,
        })
    }

    fn refresh(&self) -> Refresh {
        match self.refresh {
            RefreshPolicy::False => Refresh::False,
            RefreshPolicy::True => Refresh::True,
            RefreshPolicy::WaitFor => Refresh::WaitFor,
        }
    }
}

fn transport_error(action: &str, err: elasticsearch::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ServiceUnavailable,
        format!("Failed to {action}: {err}"),
        err,
    )
}

/// Pass a successful response through; turn any other status into an error
/// carrying the response body. 404 becomes `NotFound`.
async fn ensure_success(response: Response, action: &str) -> AppResult<Response> {
    let status = response.status_code();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let kind = if status.as_u16() == 404 {
        ErrorKind::NotFound
    } else {
        ErrorKind::ExternalService
    };
    Err(AppError::new(
        kind,
        format!("Failed to {action} (status {status}): {body}"),
    ))
}

async fn read_json(response: Response, action: &str) -> AppResult<Value> {
    response
        .json::<Value>()
        .await
        .map_err(|e| transport_error(&format!("read {action} response"), e))
}

/// The request body of a search.
pub fn build_search_body(request: &SearchRequest) -> Value {
    let mut body = Map::new();
    body.insert("query".to_string(), request.query.to_dsl());

    if !request.sort.is_empty() {
        let sort: Vec<Value> = request
            .sort
            .iter()
            .map(|s| json!({ s.field.as_str(): { "order": s.direction.as_str() } }))
            .collect();
        body.insert("sort".to_string(), Value::Array(sort));
    }

    if request.from > 0 {
        body.insert("from".to_string(), json!(request.from));
    }
    if let Some(size) = request.size {
        body.insert("size".to_string(), json!(size));
    }
    if request.track_total_hits {
        body.insert("track_total_hits".to_string(), json!(true));
    }

    Value::Object(body)
}

/// Extract the total and the `_source` documents from a search response.
pub fn parse_search_hits(body: &Value) -> AppResult<SearchHits> {
    let hits = body
        .get("hits")
        .ok_or_else(|| AppError::external_service("Search response has no hits"))?;

    // `hits.total` is an object since 7.x and a bare number before.
    let total = match hits.get("total") {
        Some(Value::Object(total)) => total.get("value").and_then(Value::as_u64).unwrap_or(0),
        Some(total) => total.as_u64().unwrap_or(0),
        None => 0,
    };

    let documents = hits
        .get("hits")
        .and_then(Value::as_array)
        .map(|hits| {
            hits.iter()
                .filter_map(|hit| hit.get("_source").cloned())
                .collect()
        })
        .unwrap_or_default();

    Ok(SearchHits { total, documents })
}

/// Collect the rejected items of a bulk response.
pub fn parse_bulk_response(body: &Value) -> BulkResponse {
    let took_ms = body.get("took").and_then(Value::as_u64).unwrap_or(0);

    let failed = body
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                // Each item is keyed by its action: {"index": {...}}.
                .filter_map(|item| item.as_object()?.values().next())
                .filter_map(|result| {
                    let error = result.get("error")?;
                    Some(BulkItemFailure {
                        id: result
                            .get("_id")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        status: result
                            .get("status")
                            .and_then(Value::as_u64)
                            .unwrap_or(0) as u16,
                        reason: error
                            .get("reason")
                            .and_then(Value::as_str)
                            .map(str::to_string)
                            .unwrap_or_else(|| error.to_string()),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    BulkResponse { took_ms, failed }
}

#[async_trait]
impl SearchBackend for ElasticsearchBackend {
    fn name(&self) -> &'static str {
        "elasticsearch"
    }

    async fn index_document(&self, index: &str, id: &str, document: Value) -> AppResult<()> {
        debug!(index, id, "Indexing document");
        let response = self
            .client
            .index(IndexParts::IndexId(index, id))
            .refresh(self.refresh())
            .body(document)
            .send()
            .await
            .map_err(|e| transport_error("index document", e))?;

        ensure_success(response, "index document").await?;
        Ok(())
    }

    async fn bulk_index(
        &self,
        index: &str,
        documents: Vec<(String, Value)>,
    ) -> AppResult<BulkResponse> {
        debug!(index, count = documents.len(), "Bulk indexing documents");
        let mut operations = BulkOperations::new();
        for (id, document) in documents {
            operations
                .push(BulkOperation::index(document).id(id))
                .map_err(|e| transport_error("encode bulk operation", e))?;
        }

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .refresh(self.refresh())
            .body(vec![operations])
            .send()
            .await
            .map_err(|e| transport_error("bulk index", e))?;

        let response = ensure_success(response, "bulk index").await?;
        let body = read_json(response, "bulk").await?;
        Ok(parse_bulk_response(&body))
    }

    async fn get_document(&self, index: &str, id: &str) -> AppResult<Option<Value>> {
        debug!(index, id, "Fetching document");
        let response = self
            .client
            .get(GetParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| transport_error("get document", e))?;

        if response.status_code().as_u16() == 404 {
            return Ok(None);
        }

        let response = ensure_success(response, "get document").await?;
        let body = read_json(response, "get").await?;
        if body.get("found").and_then(Value::as_bool) == Some(false) {
            return Ok(None);
        }
        Ok(body.get("_source").cloned())
    }

    async fn search(&self, index: &str, request: &SearchRequest) -> AppResult<SearchHits> {
        let body = build_search_body(request);
        debug!(index, body = %body, "Searching");

        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await
            .map_err(|e| transport_error("search", e))?;

        let response = ensure_success(response, "search").await?;
        let body = read_json(response, "search").await?;
        parse_search_hits(&body)
    }

    async fn delete_document(&self, index: &str, id: &str) -> AppResult<()> {
        debug!(index, id, "Deleting document");
        let response = self
            .client
            .delete(DeleteParts::IndexId(index, id))
            .refresh(self.refresh())
            .send()
            .await
            .map_err(|e| transport_error("delete document", e))?;

        ensure_success(response, "delete document").await?;
        Ok(())
    }

    async fn delete_by_query(&self, index: &str, query: &SearchQuery) -> AppResult<u64> {
        debug!(index, "Deleting by query");
        let response = self
            .client
            .delete_by_query(DeleteByQueryParts::Index(&[index]))
            .refresh(self.refresh != RefreshPolicy::False)
            .body(json!({ "query": query.to_dsl() }))
            .send()
            .await
            .map_err(|e| transport_error("delete by query", e))?;

        let response = ensure_success(response, "delete by query").await?;
        let body = read_json(response, "delete by query").await?;
        Ok(body.get("deleted").and_then(Value::as_u64).unwrap_or(0))
    }

    async fn document_exists(&self, index: &str, id: &str) -> AppResult<bool> {
        let response = self
            .client
            .exists(ExistsParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| transport_error("check document", e))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(AppError::external_service(format!(
                "Unexpected status {status} checking document {id} in {index}"
            ))),
        }
    }

    async fn update_document(&self, index: &str, id: &str, partial: Value) -> AppResult<()> {
        debug!(index, id, "Updating document");
        let response = self
            .client
            .update(UpdateParts::IndexId(index, id))
            .refresh(self.refresh())
            .body(json!({ "doc": partial }))
            .send()
            .await
            .map_err(|e| transport_error("update document", e))?;

        ensure_success(response, "update document").await?;
        Ok(())
    }

    async fn count(&self, index: &str) -> AppResult<u64> {
        let response = self
            .client
            .count(CountParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| transport_error("count documents", e))?;

        let response = ensure_success(response, "count documents").await?;
        let body = read_json(response, "count").await?;
        body.get("count")
            .and_then(Value::as_u64)
            .ok_or_else(|| AppError::external_service("Count response has no count"))
    }

    async fn ping(&self) -> AppResult<bool> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| transport_error("ping cluster", e))?;
        Ok(response.status_code().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::types::sorting::SortField;

    #[test]
    fn test_paged_search_body() {
        let request = SearchRequest::new(SearchQuery::for_search_text(Some("phone")))
            .with_sort(vec![SortField::asc("name.keyword"), SortField::desc("createdAt")])
            .with_page(20, 10);

        assert_eq!(
            build_search_body(&request),
            json!({
                "query": { "query_string": { "query": "*phone*" } },
                "sort": [
                    { "name.keyword": { "order": "asc" } },
                    { "createdAt": { "order": "desc" } }
                ],
                "from": 20,
                "size": 10,
                "track_total_hits": true
            })
        );
    }

    #[test]
    fn test_unpaged_search_body() {
        let request = SearchRequest::new(SearchQuery::MatchAll).with_size(10_000);
        assert_eq!(
            build_search_body(&request),
            json!({ "query": { "match_all": {} }, "size": 10000 })
        );
    }

    #[test]
    fn test_parse_search_hits() {
        let body = json!({
            "took": 3,
            "hits": {
                "total": { "value": 25, "relation": "eq" },
                "hits": [
                    { "_id": "p1", "_source": { "id": "p1", "name": "Widget" } },
                    { "_id": "p2", "_source": { "id": "p2", "name": "Gadget" } }
                ]
            }
        });

        let hits = parse_search_hits(&body).unwrap();
        assert_eq!(hits.total, 25);
        assert_eq!(hits.documents.len(), 2);
        assert_eq!(hits.documents[1]["name"], "Gadget");
    }

    #[test]
    fn test_parse_legacy_total() {
        let body = json!({ "hits": { "total": 4, "hits": [] } });
        assert_eq!(parse_search_hits(&body).unwrap().total, 4);
    }

    #[test]
    fn test_parse_search_without_hits_fails() {
        assert!(parse_search_hits(&json!({ "error": "boom" })).is_err());
    }

    #[test]
    fn test_parse_bulk_response_collects_failures() {
        let body = json!({
            "took": 30,
            "errors": true,
            "items": [
                { "index": { "_id": "p1", "status": 201, "result": "created" } },
                {
                    "index": {
                        "_id": "p2",
                        "status": 400,
                        "error": {
                            "type": "document_parsing_exception",
                            "reason": "failed to parse field [price]"
                        }
                    }
                }
            ]
        });

        let response = parse_bulk_response(&body);
        assert_eq!(response.took_ms, 30);
        assert!(!response.is_success());
        assert_eq!(
            response.failed,
            vec![BulkItemFailure {
                id: "p2".to_string(),
                status: 400,
                reason: "failed to parse field [price]".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_bulk_response_all_accepted() {
        let body = json!({
            "took": 5,
            "errors": false,
            "items": [{ "index": { "_id": "p1", "status": 201 } }]
        });
        assert!(parse_bulk_response(&body).is_success());
    }

    #[test]
    fn test_builds_from_default_config() {
        assert!(ElasticsearchBackend::new(&SearchConfig::default()).is_ok());
    }
}
