//! In-process search backend.
//!
//! Holds documents in memory and evaluates [`SearchQuery`] predicates
//! directly against their JSON. Used for local development and tests; it
//! approximates the engine's analysis (lowercased whitespace tokens) and is
//! not a relevance engine.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::traits::search_backend::{BulkResponse, SearchBackend, SearchHits};
use catalog_core::types::query::{QueryValue, SearchQuery, SearchRequest};
use catalog_core::types::sorting::{KEYWORD_SUFFIX, SortDirection, SortField};

/// Search backend keeping every index in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    indices: DashMap<String, BTreeMap<String, Value>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SearchBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn index_document(&self, index: &str, id: &str, document: Value) -> AppResult<()> {
        self.indices
            .entry(index.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn bulk_index(
        &self,
        index: &str,
        documents: Vec<(String, Value)>,
    ) -> AppResult<BulkResponse> {
        let mut entry = self.indices.entry(index.to_string()).or_default();
        for (id, document) in documents {
            entry.insert(id, document);
        }
        Ok(BulkResponse::default())
    }

    async fn get_document(&self, index: &str, id: &str) -> AppResult<Option<Value>> {
        Ok(self
            .indices
            .get(index)
            .and_then(|docs| docs.get(id).cloned()))
    }

    async fn search(&self, index: &str, request: &SearchRequest) -> AppResult<SearchHits> {
        let Some(docs) = self.indices.get(index) else {
            return Ok(SearchHits::default());
        };

        let mut matched: Vec<&Value> = docs
            .values()
            .filter(|doc| matches(&request.query, doc))
            .collect();
        let total = matched.len() as u64;

        if !request.sort.is_empty() {
            matched.sort_by(|a, b| compare_by(&request.sort, a, b));
        }

        let from = usize::try_from(request.from).unwrap_or(usize::MAX);
        let size = request
            .size
            .map(|s| usize::try_from(s).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);

        let documents = matched
            .into_iter()
            .skip(from)
            .take(size)
            .cloned()
            .collect();

        debug!(index, total, "In-memory search");
        Ok(SearchHits { total, documents })
    }

    async fn delete_document(&self, index: &str, id: &str) -> AppResult<()> {
        self.indices
            .get_mut(index)
            .and_then(|mut docs| docs.remove(id))
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Document {id} not found in {index}")))
    }

    async fn delete_by_query(&self, index: &str, query: &SearchQuery) -> AppResult<u64> {
        let Some(mut docs) = self.indices.get_mut(index) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|_, doc| !matches(query, doc));
        Ok((before - docs.len()) as u64)
    }

    async fn document_exists(&self, index: &str, id: &str) -> AppResult<bool> {
        Ok(self
            .indices
            .get(index)
            .is_some_and(|docs| docs.contains_key(id)))
    }

    async fn update_document(&self, index: &str, id: &str, partial: Value) -> AppResult<()> {
        let mut docs = self
            .indices
            .get_mut(index)
            .ok_or_else(|| AppError::not_found(format!("Index {index} not found")))?;
        let doc = docs
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Document {id} not found in {index}")))?;
        merge(doc, partial);
        Ok(())
    }

    async fn count(&self, index: &str) -> AppResult<u64> {
        Ok(self
            .indices
            .get(index)
            .map(|docs| docs.len() as u64)
            .unwrap_or(0))
    }

    async fn ping(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// Recursively merge `patch` into `target`.
fn merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                let nested = value.is_object() && target.get(&key).is_some_and(Value::is_object);
                match target.get_mut(&key) {
                    Some(existing) if nested => merge(existing, value),
                    _ => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}

/// Strip the keyword sub-field suffix; in memory the field itself is exact.
fn base_field(field: &str) -> &str {
    field.strip_suffix(KEYWORD_SUFFIX).unwrap_or(field)
}

/// Look up a dotted field path.
fn field_value<'a>(doc: &'a Value, field: &str) -> Option<&'a Value> {
    base_field(field)
        .split('.')
        .try_fold(doc, |value, part| value.get(part))
}

fn matches(query: &SearchQuery, doc: &Value) -> bool {
    match query {
        SearchQuery::MatchAll => true,
        SearchQuery::QueryString { query, fields } => {
            let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
            if terms.is_empty() {
                return true;
            }
            let values: Vec<&Value> = if fields.is_empty() {
                let mut leaves = Vec::new();
                collect_leaves(doc, &mut leaves);
                leaves
            } else {
                fields.iter().filter_map(|f| field_value(doc, f)).collect()
            };
            terms
                .iter()
                .any(|term| values.iter().any(|v| text_matches_pattern(v, term)))
        }
        SearchQuery::Term { field, value } => {
            field_value(doc, field).is_some_and(|v| term_equals(v, value))
        }
        SearchQuery::Match { field, text } => {
            let wanted = tokens(text);
            field_value(doc, field)
                .and_then(scalar_text)
                .is_some_and(|have| tokens(&have).iter().any(|t| wanted.contains(t)))
        }
        SearchQuery::Range { field, gte, lte } => {
            let Some(value) = field_value(doc, field) else {
                return false;
            };
            let lower_ok = gte
                .as_ref()
                .is_none_or(|bound| compare_to(value, bound).is_some_and(Ordering::is_ge));
            let upper_ok = lte
                .as_ref()
                .is_none_or(|bound| compare_to(value, bound).is_some_and(Ordering::is_le));
            lower_ok && upper_ok
        }
        SearchQuery::Bool {
            must,
            should,
            must_not,
            filter,
        } => {
            let required = must.iter().chain(filter).all(|q| matches(q, doc));
            let excluded = must_not.iter().any(|q| matches(q, doc));
            // `should` only constrains when nothing else is required.
            let optional = if must.is_empty() && filter.is_empty() && !should.is_empty() {
                should.iter().any(|q| matches(q, doc))
            } else {
                true
            };
            required && !excluded && optional
        }
    }
}

fn collect_leaves<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => map.values().for_each(|v| collect_leaves(v, out)),
        Value::Array(items) => items.iter().for_each(|v| collect_leaves(v, out)),
        Value::Null => {}
        leaf => out.push(leaf),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Whether any token of `value`, or the whole value, matches the lowercase
/// wildcard `pattern` (`*` any run, `?` one character).
fn text_matches_pattern(value: &Value, pattern: &str) -> bool {
    let Some(text) = scalar_text(value) else {
        return false;
    };
    let text = text.to_lowercase();
    wildcard_match(pattern, &text) || tokens(&text).iter().any(|t| wildcard_match(pattern, t))
}

fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, t));
            p += 1;
        } else if let Some((sp, st)) = star {
            p = sp + 1;
            t = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|&c| c == '*')
}

fn term_equals(value: &Value, expected: &QueryValue) -> bool {
    match (value, expected) {
        (Value::String(s), QueryValue::String(e)) => s == e,
        (Value::Bool(b), QueryValue::Boolean(e)) => b == e,
        (Value::Number(n), QueryValue::Integer(e)) => n.as_f64() == Some(*e as f64),
        (Value::Number(n), QueryValue::Float(e)) => n.as_f64() == Some(*e),
        (Value::Array(items), _) => items.iter().any(|v| term_equals(v, expected)),
        _ => false,
    }
}

fn compare_to(value: &Value, bound: &QueryValue) -> Option<Ordering> {
    match (value, bound) {
        (Value::Number(n), QueryValue::Integer(b)) => n.as_f64()?.partial_cmp(&(*b as f64)),
        (Value::Number(n), QueryValue::Float(b)) => n.as_f64()?.partial_cmp(b),
        (Value::String(s), QueryValue::String(b)) => Some(s.as_str().cmp(b.as_str())),
        _ => None,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Compare two documents by each sort field in turn. Documents missing a
/// field sort after those that have it, whatever the direction.
fn compare_by(sort: &[SortField], a: &Value, b: &Value) -> Ordering {
    for field in sort {
        let left = field_value(a, &field.field).filter(|v| !v.is_null());
        let right = field_value(b, &field.field).filter(|v| !v.is_null());
        let ordering = match (left, right) {
            (Some(l), Some(r)) => {
                let ord = compare_values(l, r);
                match field.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
