//! JSON output for the accumulated articles.
//!
//! The file holds a single JSON array in API page order, pretty printed with
//! four-space indentation. Non-ASCII text is written as UTF-8, never escaped.
//! An existing file at the target path is overwritten.

use crate::error::NapiError;
use crate::models::Article;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize `articles` as an indented JSON array.
pub fn to_pretty_json(articles: &[Article]) -> Result<Vec<u8>, NapiError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    articles.serialize(&mut ser).map_err(NapiError::Serialize)?;
    Ok(buf)
}

/// Write `articles` to `path` as one JSON array.
///
/// # Errors
///
/// [`NapiError::Serialize`] if the records cannot be encoded,
/// [`NapiError::Io`] if the file cannot be written.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = articles.len()))]
pub async fn write_articles(articles: &[Article], path: &Path) -> Result<(), NapiError> {
    let json = to_pretty_json(articles)?;
    fs::write(path, &json)
        .await
        .map_err(|e| NapiError::io(path, e))?;
    info!(bytes = json.len(), "Wrote articles JSON");
    Ok(())
}
