//! Command-line interface definitions for napi.
//!
//! One subcommand, `pull`. The endpoint can also be set through the
//! environment; the API key is resolved separately (see
//! [`crate::credentials`]) so the argument, environment, and env-file layers
//! keep their precedence.

use crate::api::DEFAULT_ENDPOINT;
use crate::credentials::DEFAULT_ENV_FILE;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Hint printed when no subcommand is given.
pub const NO_COMMAND_HINT: &str =
    "No command specified. Use 'napi pull' to pull data from NewsAPI.";

/// A CLI tool for pulling data from NewsAPI endpoints.
///
/// # Examples
///
/// ```sh
/// # Key from NEWSAPI_API_KEY or .env
/// napi pull query.json results.json
///
/// # Explicit key
/// napi pull query.json results.json --api-key YOUR_KEY
/// ```
#[derive(Parser, Debug)]
#[command(name = "napi", author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pull data from NewsAPI
    Pull(PullArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PullArgs {
    /// The json query in newsapi format, created via the API sandbox.
    pub query_json: PathBuf,

    /// The output path to which the results will be saved.
    pub output_json: PathBuf,

    /// Your newsapi.ai API key. Can be passed as an argument, set as an
    /// environment variable (NEWSAPI_API_KEY), or stored in a .env.
    #[arg(long, alias = "api_key")]
    pub api_key: Option<String>,

    /// Article search endpoint
    #[arg(long, env = "NAPI_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Env file consulted for NEWSAPI_API_KEY when it is not set otherwise
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,
}
