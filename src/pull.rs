//! The `pull` command: query file in, article array out.
//!
//! Order of operations:
//! 1. check the output directory exists (before any network activity)
//! 2. resolve the API key
//! 3. load the query file and merge the key
//! 4. paginate through every page
//! 5. write the articles
//!
//! Nothing is written unless every page was fetched.

use crate::api::{NewsApiClient, PageSource};
use crate::cli::PullArgs;
use crate::credentials::{Environment, resolve_api_key};
use crate::error::NapiError;
use crate::models::QueryParams;
use crate::outputs::json;
use crate::pagination::fetch_all;
use crate::utils::ensure_parent_dir_exists;
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Run `napi pull` against the HTTP API. Returns the number of articles written.
pub async fn run(args: &PullArgs, env: &Environment) -> Result<usize, NapiError> {
    let client = NewsApiClient::new(&args.endpoint)?;
    info!(endpoint = %client.endpoint(), "Using article endpoint");
    run_with_source(&client, args, env).await
}

/// Run the pull with an arbitrary page source.
pub async fn run_with_source<S: PageSource>(
    source: &S,
    args: &PullArgs,
    env: &Environment,
) -> Result<usize, NapiError> {
    ensure_parent_dir_exists(&args.output_json)?;

    let api_key = resolve_api_key(args.api_key.as_deref(), env)?;
    let params = load_query(&args.query_json).await?.with_api_key(&api_key);
    info!(fields = params.len(), "Loaded query parameters");

    let articles = fetch_all(source, &params).await?;
    json::write_articles(&articles, &args.output_json).await?;
    Ok(articles.len())
}

/// Read the query file as a JSON object.
///
/// # Errors
///
/// [`NapiError::Io`] if the file cannot be read, [`NapiError::MalformedInputFile`]
/// if it is not JSON or not an object.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_query(path: &Path) -> Result<QueryParams, NapiError> {
    let text = fs::read_to_string(path)
        .await
        .map_err(|e| NapiError::io(path, e))?;

    let value: Value = serde_json::from_str(&text).map_err(|e| NapiError::MalformedInputFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(QueryParams::new(map)),
        other => Err(NapiError::MalformedInputFile {
            path: path.to_path_buf(),
            reason: format!("expected an object, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
