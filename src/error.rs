//! Error taxonomy for a `napi pull` run.
//!
//! Every variant is terminal. Nothing is retried and nothing is recovered
//! locally; the first error aborts the run before any output is written.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for every stage of a pull.
#[derive(Debug, Error)]
pub enum NapiError {
    /// No API key in the argument, the environment, or the env file.
    #[error(
        "No API key found. Provide via --api-key, the {var} environment variable, or a .env file."
    )]
    MissingCredential {
        /// Name of the environment variable that was consulted.
        var: &'static str,
    },

    /// The env file exists but could not be parsed.
    #[error("Failed to parse env file {}: {source}", .path.display())]
    MalformedEnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// The output file's parent directory does not exist.
    #[error("Output directory {} does not exist.", .0.display())]
    InvalidInputPath(PathBuf),

    /// The query file is not a JSON object.
    #[error("Query file {} is not a valid JSON object: {reason}", .path.display())]
    MalformedInputFile { path: PathBuf, reason: String },

    /// Filesystem error while reading the query or writing the output.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured endpoint is not a usable URL.
    #[error("Invalid endpoint URL {0:?}")]
    InvalidEndpoint(String),

    /// The request never produced a response (connect, TLS, timeout).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpError { status: StatusCode, url: String },

    /// The API answered 2xx but reported an error in the body.
    #[error("API error: {0}")]
    ApiError(String),

    /// The body is not the expected `{"articles": {"results": [...], "pages": n}}`.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The accumulated records could not be serialized.
    #[error("Failed to serialize results: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl NapiError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
