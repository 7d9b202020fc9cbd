//! # napi
//!
//! Pull article search results from the newsapi.ai (Event Registry) API and
//! save them to a local JSON file.
//!
//! ## Usage
//!
//! ```sh
//! napi pull query.json results.json --api-key YOUR_KEY
//! ```
//!
//! ## Architecture
//!
//! 1. **Credentials**: argument, then `NEWSAPI_API_KEY`, then `.env`
//! 2. **Fetching**: one POST per page, strictly sequential
//! 3. **Pagination**: keep going until the reported page count is exhausted
//! 4. **Output**: one pretty-printed JSON array, written only on success

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod credentials;
mod error;
mod models;
mod outputs;
mod pagination;
mod pull;
mod utils;

use cli::{Cli, Commands, NO_COMMAND_HINT};
use credentials::Environment;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(Commands::Pull(args)) = cli.command else {
        println!("{NO_COMMAND_HINT}");
        return ExitCode::from(1);
    };
    debug!(query = %args.query_json.display(), output = %args.output_json.display(), "Parsed CLI arguments");

    let start_time = std::time::Instant::now();
    let env = Environment::from_process(&args.env_file);

    match pull::run(&args, &env).await {
        Ok(count) => {
            let elapsed = start_time.elapsed();
            info!(
                articles = count,
                path = %args.output_json.display(),
                secs = elapsed.as_secs(),
                millis = elapsed.subsec_millis(),
                "Pull complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Pull failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
