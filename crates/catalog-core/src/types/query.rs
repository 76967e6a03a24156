//! Typed search predicates and search requests.
//!
//! [`SearchQuery`] is the structured predicate callers hand to the
//! repository. It covers the subset of the search engine's query DSL the
//! application uses and renders to that DSL with [`SearchQuery::to_dsl`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::sorting::SortField;

/// A scalar value compared against a document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// A boolean value.
    Boolean(bool),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A string value.
    String(String),
}

impl QueryValue {
    /// The JSON form of this value.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Boolean(b) => json!(b),
            Self::Integer(i) => json!(i),
            Self::Float(f) => json!(f),
            Self::String(s) => json!(s),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// A structured search predicate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchQuery {
    /// Every document.
    #[default]
    MatchAll,
    /// Lucene query-string syntax, over `fields` or every field when empty.
    QueryString {
        /// The query text, wildcards included.
        query: String,
        /// Fields to search; empty means all fields.
        #[serde(default)]
        fields: Vec<String>,
    },
    /// Exact value on a (keyword) field.
    Term {
        /// Field name.
        field: String,
        /// Value the field must equal.
        value: QueryValue,
    },
    /// Analyzed full-text match on one field.
    Match {
        /// Field name.
        field: String,
        /// Text to match.
        text: String,
    },
    /// Inclusive range on a field.
    Range {
        /// Field name.
        field: String,
        /// Lower bound (inclusive).
        #[serde(default)]
        gte: Option<QueryValue>,
        /// Upper bound (inclusive).
        #[serde(default)]
        lte: Option<QueryValue>,
    },
    /// Boolean composition of other predicates.
    Bool {
        /// All must match (scored).
        #[serde(default)]
        must: Vec<SearchQuery>,
        /// At least one must match when `must` and `filter` are empty.
        #[serde(default)]
        should: Vec<SearchQuery>,
        /// None may match.
        #[serde(default)]
        must_not: Vec<SearchQuery>,
        /// All must match (unscored).
        #[serde(default)]
        filter: Vec<SearchQuery>,
    },
}

impl SearchQuery {
    /// Full-text query matching `*text*` across every field, or match-all
    /// when `text` is absent or blank.
    pub fn for_search_text(text: Option<&str>) -> Self {
        match text.map(str::trim) {
            Some(text) if !text.is_empty() => Self::QueryString {
                query: format!("*{text}*"),
                fields: Vec::new(),
            },
            _ => Self::MatchAll,
        }
    }

    /// Exact-value predicate.
    pub fn term(field: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Full-text predicate on one field.
    pub fn matches(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Match {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Inclusive range predicate.
    pub fn range(
        field: impl Into<String>,
        gte: Option<QueryValue>,
        lte: Option<QueryValue>,
    ) -> Self {
        Self::Range {
            field: field.into(),
            gte,
            lte,
        }
    }

    /// Conjunction of unscored filters.
    pub fn all_of(filters: Vec<SearchQuery>) -> Self {
        Self::Bool {
            must: Vec::new(),
            should: Vec::new(),
            must_not: Vec::new(),
            filter: filters,
        }
    }

    /// Render to the search engine's query DSL.
    pub fn to_dsl(&self) -> Value {
        match self {
            Self::MatchAll => json!({ "match_all": {} }),
            Self::QueryString { query, fields } => {
                let mut body = Map::new();
                body.insert("query".to_string(), json!(query));
                if !fields.is_empty() {
                    body.insert("fields".to_string(), json!(fields));
                }
                json!({ "query_string": body })
            }
            Self::Term { field, value } => json!({ "term": { field: value.to_json() } }),
            Self::Match { field, text } => json!({ "match": { field: text } }),
            Self::Range { field, gte, lte } => {
                let mut bounds = Map::new();
                if let Some(gte) = gte {
                    bounds.insert("gte".to_string(), gte.to_json());
                }
                if let Some(lte) = lte {
                    bounds.insert("lte".to_string(), lte.to_json());
                }
                json!({ "range": { field: bounds } })
            }
            Self::Bool {
                must,
                should,
                must_not,
                filter,
            } => {
                let mut body = Map::new();
                for (name, clauses) in [
                    ("must", must),
                    ("should", should),
                    ("must_not", must_not),
                    ("filter", filter),
                ] {
                    if !clauses.is_empty() {
                        let rendered: Vec<Value> = clauses.iter().map(Self::to_dsl).collect();
                        body.insert(name.to_string(), Value::Array(rendered));
                    }
                }
                json!({ "bool": body })
            }
        }
    }
}

/// A search against one index as the backend executes it.
///
/// Sort fields carry engine sort keys (see
/// [`SortField::sort_key`](super::sorting::SortField::sort_key)).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchRequest {
    /// The predicate.
    pub query: SearchQuery,
    /// Sort clauses, applied in order.
    pub sort: Vec<SortField>,
    /// Number of hits to skip.
    pub from: u64,
    /// Maximum number of hits to return; `None` leaves it to the backend.
    pub size: Option<u64>,
    /// Count every match instead of stopping at the engine's default cap.
    pub track_total_hits: bool,
}

impl SearchRequest {
    /// A request for documents matching `query`.
    pub fn new(query: SearchQuery) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    /// Set the sort clauses.
    pub fn with_sort(mut self, sort: Vec<SortField>) -> Self {
        self.sort = sort;
        self
    }

    /// Set the offset and page size.
    pub fn with_page(mut self, from: u64, size: u64) -> Self {
        self.from = from;
        self.size = Some(size);
        self.track_total_hits = true;
        self
    }

    /// Set the maximum number of hits without an offset.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}
