//! Data models for the request parameters and the paged article responses.
//!
//! - [`QueryParams`]: the query loaded from the user's JSON file plus the API key
//! - [`ArticlePage`]: one page of search results as returned by the API
//! - [`Article`]: a single article record, kept opaque
//!
//! Field names on the wire are camelCase to match the Event Registry API.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Request field carrying the API key.
pub const API_KEY_FIELD: &str = "apiKey";
/// Request field carrying the 1-based page index.
pub const PAGE_FIELD: &str = "articlesPage";

/// A single article record.
///
/// The shape is owned by the API and never interpreted here; records are
/// passed through to the output file exactly as received.
pub type Article = Value;

/// Query parameters for the `getArticles` endpoint.
///
/// Holds the user's query verbatim with the API key merged in. The base value
/// is never mutated by pagination: each request body is derived with
/// [`QueryParams::for_page`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    base: Map<String, Value>,
}

impl QueryParams {
    /// Wrap a user-supplied query object.
    pub fn new(query: Map<String, Value>) -> Self {
        Self { base: query }
    }

    /// Merge the API key into the query, overwriting any `apiKey` already present.
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.base
            .insert(API_KEY_FIELD.to_string(), Value::String(api_key.to_string()));
        self
    }

    /// Build the request body for `page`.
    pub fn for_page(&self, page: u32) -> Map<String, Value> {
        let mut body = self.base.clone();
        body.insert(PAGE_FIELD.to_string(), Value::from(page));
        body
    }

    /// Number of fields in the base query, for logging.
    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}

/// Response envelope: the API nests the page under `articles`.
///
/// `error` is set instead of `articles` when the API rejects a request with a
/// success status.
#[derive(Debug, Deserialize)]
pub struct ArticlesResponse {
    pub articles: Option<ArticlePage>,
    pub error: Option<Value>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlePage {
    /// Articles on this page, in API order.
    pub results: Vec<Article>,
    /// Total number of pages for the query. Absent or `null` reads as unknown.
    #[serde(default)]
    pub pages: Option<u32>,
}

impl ArticlePage {
    /// Total page count reported by the API, `0` when unknown.
    pub fn total_pages(&self) -> u32 {
        self.pages.unwrap_or(0)
    }
}
