//! Sequential pagination over a [`PageSource`].
//!
//! Page 1 is always fetched: the total page count is unknown until the first
//! response arrives. After that the loop stops once `page > total_pages`, so a
//! response reporting `pages: 0` (or no `pages` at all) ends the run after a
//! single request.

use crate::api::PageSource;
use crate::error::NapiError;
use crate::models::{Article, QueryParams};
use std::time::Instant;
use tracing::{info, instrument};

/// Fetch every page of the query and return all articles in page order.
///
/// One request is in flight at a time. The first failed fetch aborts the
/// loop and everything accumulated so far is dropped.
#[instrument(level = "info", skip_all)]
pub async fn fetch_all<S: PageSource>(
    source: &S,
    params: &QueryParams,
) -> Result<Vec<Article>, NapiError> {
    let t0 = Instant::now();
    let mut articles: Vec<Article> = Vec::new();
    let mut page: u32 = 1;
    let mut total_pages: u32 = 0;

    loop {
        if page > 1 && page > total_pages {
            break;
        }

        let result = source.fetch_page(params, page).await?;
        total_pages = result.total_pages();
        let count = result.results.len();
        articles.extend(result.results);

        info!(
            page,
            total_pages,
            page_articles = count,
            accumulated = articles.len(),
            "Fetched page {}/{}",
            page,
            total_pages
        );
        page += 1;
    }

    info!(
        pages_fetched = page - 1,
        articles = articles.len(),
        elapsed_ms = t0.elapsed().as_millis(),
        "Pagination complete"
    );
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticlePage;
    use serde_json::{Map, json};
    use std::cell::RefCell;

    /// Replays canned pages and records every page index requested.
    /// Each scripted entry is handed out once, errors included.
    struct ScriptedSource {
        pages: RefCell<Vec<Option<Result<ArticlePage, NapiError>>>>,
        requested: RefCell<Vec<u32>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<ArticlePage, NapiError>>) -> Self {
            Self {
                pages: RefCell::new(pages.into_iter().map(Some).collect()),
                requested: RefCell::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.borrow().clone()
        }
    }

    impl PageSource for ScriptedSource {
        async fn fetch_page(
            &self,
            params: &QueryParams,
            page: u32,
        ) -> Result<ArticlePage, NapiError> {
            assert_eq!(params.for_page(page)["articlesPage"], json!(page));
            self.requested.borrow_mut().push(page);
            self.pages
                .borrow_mut()
                .get_mut(page as usize - 1)
                .and_then(Option::take)
                .unwrap_or_else(|| panic!("page {page} requested beyond script"))
        }
    }

    fn page(titles: &[&str], pages: Option<u32>) -> Result<ArticlePage, NapiError> {
        Ok(ArticlePage {
            results: titles.iter().map(|t| json!({ "title": t })).collect(),
            pages,
        })
    }

    fn params() -> QueryParams {
        let mut query = Map::new();
        query.insert("keyword".to_string(), json!("x"));
        QueryParams::new(query).with_api_key("k")
    }

    #[tokio::test]
    async fn test_fetches_every_reported_page_in_order() {
        let source = ScriptedSource::new(vec![
            page(&["A", "B"], Some(3)),
            page(&["C"], Some(3)),
            page(&["D", "E", "F"], Some(3)),
        ]);

        let articles = fetch_all(&source, &params()).await.unwrap();

        assert_eq!(source.requested(), vec![1, 2, 3]);
        let titles: Vec<_> = articles.iter().map(|a| a["title"].clone()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[tokio::test]
    async fn test_two_page_scenario() {
        let source = ScriptedSource::new(vec![page(&["A"], Some(2)), page(&["B"], None)]);

        let articles = fetch_all(&source, &params()).await.unwrap();

        assert_eq!(articles, vec![json!({"title": "A"}), json!({"title": "B"})]);
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_single_page_fetches_once() {
        let source = ScriptedSource::new(vec![page(&["A", "B"], Some(1))]);

        let articles = fetch_all(&source, &params()).await.unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(source.requested(), vec![1]);
    }

    #[tokio::test]
    async fn test_zero_or_missing_pages_fetches_once() {
        for pages in [Some(0), None] {
            let source = ScriptedSource::new(vec![page(&["only"], pages)]);

            let articles = fetch_all(&source, &params()).await.unwrap();

            assert_eq!(articles, vec![json!({"title": "only"})]);
            assert_eq!(source.requested(), vec![1]);
        }
    }

    #[tokio::test]
    async fn test_empty_first_page_returns_nothing() {
        let source = ScriptedSource::new(vec![page(&[], Some(0))]);

        let articles = fetch_all(&source, &params()).await.unwrap();

        assert!(articles.is_empty());
        assert_eq!(source.requested(), vec![1]);
    }

    #[tokio::test]
    async fn test_total_pages_follows_latest_response() {
        // The API may revise its page count; the most recent value governs.
        let source = ScriptedSource::new(vec![
            page(&["A"], Some(4)),
            page(&["B"], Some(2)),
        ]);

        let articles = fetch_all(&source, &params()).await.unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_failure_mid_run_aborts() {
        let source = ScriptedSource::new(vec![
            page(&["A"], Some(3)),
            Err(NapiError::HttpError {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                url: "https://example.com/articles".to_string(),
            }),
            page(&["C"], Some(3)),
        ]);

        let err = fetch_all(&source, &params()).await.expect_err("page 2 fails");

        match err {
            NapiError::HttpError { status, .. } => assert_eq!(status.as_u16(), 500),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_api_error_is_returned_unchanged() {
        let source = ScriptedSource::new(vec![
            page(&["A"], Some(2)),
            Err(NapiError::ApiError("daily quota exceeded".to_string())),
        ]);

        let err = fetch_all(&source, &params()).await.expect_err("page 2 fails");

        match err {
            NapiError::ApiError(msg) => assert_eq!(msg, "daily quota exceeded"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(source.requested(), vec![1, 2]);
    }
}
