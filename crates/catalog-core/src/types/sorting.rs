//! Sorting types and the sort-specification parser for list endpoints.
//!
//! A sort specification is a comma-separated list of `field [asc|desc]`
//! tokens, e.g. `"name, createdAt desc"`. Parsing yields one [`SortField`]
//! per token, in order.
//!
//! Text fields are not sortable in the search engine; their exact-match
//! keyword sub-field is. [`SortField::sort_key`] applies the naming rule:
//! a field whose name contains `At` (`createdAt`, `updatedAt`, ...) is
//! taken to be a timestamp and used verbatim, every other field is
//! addressed through its `.keyword` sub-field.

use serde::{Deserialize, Serialize};

/// Suffix addressing the exact-match sortable sub-field of a text field.
pub const KEYWORD_SUFFIX: &str = ".keyword";

/// Substring marking a field name as a timestamp.
pub const TIMESTAMP_MARKER: &str = "At";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Parse an order token. `desc` (any case) is descending; anything else
    /// is ascending.
    pub fn parse(token: &str) -> Self {
        if token.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// Return the query-DSL keyword for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A sort specification consisting of a field name and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Field name to sort by.
    pub field: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create an ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create a descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// The key the search engine sorts on for this field.
    pub fn sort_key(&self) -> String {
        resolve_sort_key(&self.field)
    }

    /// This sort with its field replaced by the engine sort key.
    pub fn resolved(&self) -> Self {
        Self::new(self.sort_key(), self.direction)
    }
}

/// Map a field name to its sortable key: timestamp-like names (containing
/// [`TIMESTAMP_MARKER`]) are kept, everything else gets [`KEYWORD_SUFFIX`].
pub fn resolve_sort_key(field: &str) -> String {
    if field.contains(TIMESTAMP_MARKER) {
        field.to_string()
    } else {
        format!("{field}{KEYWORD_SUFFIX}")
    }
}

/// Parse a sort specification into sort fields.
///
/// Tokens are separated by commas; within a token the first word is the
/// field and the optional second word the order. Empty tokens are skipped.
pub fn parse_sort_spec(spec: &str) -> Vec<SortField> {
    spec.split(',')
        .filter_map(|token| {
            let mut words = token.split_whitespace();
            let field = words.next()?;
            let direction = words.next().map(SortDirection::parse).unwrap_or_default();
            Some(SortField::new(field, direction))
        })
        .collect()
}
