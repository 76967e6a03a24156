//! Search backend configuration.

use serde::{Deserialize, Serialize};

/// Top-level search backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Backend provider: `"elasticsearch"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Elasticsearch node URLs. Only the first node is used
    /// (single-node connection pool).
    #[serde(default = "default_nodes")]
    pub nodes: Vec<String>,
    /// Optional authentication.
    #[serde(default)]
    pub auth: Option<SearchAuth>,
    /// Request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Disable TLS certificate validation. Development only.
    #[serde(default)]
    pub disable_certificate_validation: bool,
    /// Refresh policy applied to write requests.
    #[serde(default)]
    pub refresh: RefreshPolicy,
    /// Number of documents requested by unpaged queries.
    #[serde(default = "default_max_result_window")]
    pub max_result_window: u64,
    /// Index holding product documents.
    #[serde(default = "default_products_index")]
    pub products_index: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            nodes: default_nodes(),
            auth: None,
            request_timeout_ms: default_request_timeout_ms(),
            disable_certificate_validation: false,
            refresh: RefreshPolicy::default(),
            max_result_window: default_max_result_window(),
            products_index: default_products_index(),
        }
    }
}

/// Authentication against the search cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchAuth {
    /// Basic username/password authentication.
    Basic {
        /// The username.
        username: String,
        /// The password.
        password: String,
    },
    /// Bearer token authentication.
    Bearer {
        /// The bearer token.
        token: String,
    },
}

/// When written documents become visible to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RefreshPolicy {
    /// Leave refreshing to the cluster's refresh interval.
    #[default]
    #[serde(rename = "false")]
    False,
    /// Refresh the affected shards immediately.
    #[serde(rename = "true")]
    True,
    /// Block the write until a refresh makes it visible.
    #[serde(rename = "wait_for")]
    WaitFor,
}

fn default_provider() -> String {
    "elasticsearch".to_string()
}

fn default_nodes() -> Vec<String> {
    vec!["http://localhost:9200".to_string()]
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_max_result_window() -> u64 {
    10_000
}

fn default_products_index() -> String {
    "products".to_string()
}
