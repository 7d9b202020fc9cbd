//! Page fetching against the Event Registry `getArticles` endpoint.
//!
//! # Architecture
//!
//! - [`PageSource`]: trait for anything that can produce one page of results
//! - [`NewsApiClient`]: the HTTP implementation, one POST per page
//!
//! The pagination loop is generic over [`PageSource`], so it can be driven by
//! a scripted source in tests. Requests are never retried: the first failure
//! is returned to the caller.

use crate::error::NapiError;
use crate::models::{ArticlePage, ArticlesResponse, QueryParams};
use crate::utils::truncate_for_log;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use url::Url;

/// Default search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://eventregistry.org/api/v1/article/getArticles";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Trait for fetching a single page of search results.
pub trait PageSource {
    /// Fetch page `page` (1-based) of the query described by `params`.
    async fn fetch_page(&self, params: &QueryParams, page: u32) -> Result<ArticlePage, NapiError>;
}

/// HTTP client for the article search endpoint.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    http: Client,
    endpoint: Url,
}

impl NewsApiClient {
    /// Create a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// [`NapiError::InvalidEndpoint`] if `endpoint` is not an absolute http(s)
    /// URL, [`NapiError::Transport`] if the HTTP client cannot be built.
    pub fn new(endpoint: &str) -> Result<Self, NapiError> {
        let endpoint = parse_endpoint(endpoint)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("napi/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PageSource for NewsApiClient {
    #[instrument(level = "info", skip_all, fields(page = page))]
    async fn fetch_page(&self, params: &QueryParams, page: u32) -> Result<ArticlePage, NapiError> {
        let t0 = Instant::now();
        let body = params.for_page(page);

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, elapsed_ms = t0.elapsed().as_millis(), "Request rejected");
            return Err(NapiError::HttpError {
                status,
                url: self.endpoint.to_string(),
            });
        }

        let text = response.text().await?;
        debug!(
            bytes = text.len(),
            elapsed_ms = t0.elapsed().as_millis(),
            "Received page"
        );
        parse_page(&text)
    }
}

/// Parse a `getArticles` response body into an [`ArticlePage`].
pub fn parse_page(text: &str) -> Result<ArticlePage, NapiError> {
    let resp: ArticlesResponse = serde_json::from_str(text).map_err(|e| {
        warn!(
            error = %e,
            response_preview = %truncate_for_log(text, 300),
            "Response is not the expected JSON"
        );
        NapiError::MalformedResponse(e.to_string())
    })?;

    match (resp.articles, resp.error) {
        (Some(page), _) => Ok(page),
        (None, Some(serde_json::Value::String(message))) => Err(NapiError::ApiError(message)),
        (None, _) => Err(NapiError::MalformedResponse(
            "missing `articles` field".to_string(),
        )),
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, NapiError> {
    let url = Url::parse(endpoint).map_err(|_| NapiError::InvalidEndpoint(endpoint.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(NapiError::InvalidEndpoint(endpoint.to_string())),
    }
}
