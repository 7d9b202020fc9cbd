//! API key resolution.
//!
//! The key is looked up in three places, first non-empty match wins:
//!
//! 1. the `--api-key` argument
//! 2. the `NEWSAPI_API_KEY` environment variable
//! 3. `NEWSAPI_API_KEY` inside a local env file (`.env` by default)
//!
//! The process environment is captured once into an [`Environment`] and passed
//! in explicitly. Reading the env file never modifies the process environment.

use crate::error::NapiError;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable (and env-file key) holding the API key.
pub const API_KEY_VAR: &str = "NEWSAPI_API_KEY";

/// Default env file, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Where the resolved key came from. Logged instead of the key itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Argument,
    Environment,
    EnvFile,
}

/// Snapshot of the variables and env file that credential lookup may consult.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
    env_file: PathBuf,
}

impl Environment {
    /// Build an environment from explicit variables and an env-file path.
    pub fn new(vars: HashMap<String, String>, env_file: impl Into<PathBuf>) -> Self {
        Self {
            vars,
            env_file: env_file.into(),
        }
    }

    /// Capture the current process environment.
    pub fn from_process(env_file: impl Into<PathBuf>) -> Self {
        Self::from_os_vars(std::env::vars_os(), env_file)
    }

    /// Build an environment from raw OS pairs. Entries whose name or value is
    /// not valid UTF-8 are dropped and read as unset.
    pub fn from_os_vars<I>(vars: I, env_file: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let vars = vars
            .into_iter()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self::new(vars, env_file)
    }

    fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn env_file(&self) -> &Path {
        &self.env_file
    }
}

/// Resolve the API key from the argument, then the environment, then the env file.
///
/// # Errors
///
/// - [`NapiError::MissingCredential`] when no source yields a non-empty key
/// - [`NapiError::MalformedEnvFile`] when the env file exists but cannot be parsed
#[instrument(level = "info", skip_all, fields(env_file = %env.env_file().display()))]
pub fn resolve_api_key(explicit: Option<&str>, env: &Environment) -> Result<String, NapiError> {
    let (key, source) = lookup(explicit, env)?;
    info!(source = ?source, "Resolved API key");
    Ok(key)
}

fn lookup(
    explicit: Option<&str>,
    env: &Environment,
) -> Result<(String, CredentialSource), NapiError> {
    if let Some(key) = explicit.filter(|k| !k.is_empty()) {
        return Ok((key.to_string(), CredentialSource::Argument));
    }

    if let Some(key) = env.var(API_KEY_VAR) {
        return Ok((key.to_string(), CredentialSource::Environment));
    }

    if let Some(key) = read_env_file(env.env_file(), API_KEY_VAR)? {
        return Ok((key, CredentialSource::EnvFile));
    }

    Err(NapiError::MissingCredential { var: API_KEY_VAR })
}

/// Read `key` from a dotenv-style file without touching the process environment.
///
/// A missing file is not an error. Later assignments override earlier ones,
/// and empty values count as unset.
fn read_env_file(path: &Path, key: &str) -> Result<Option<String>, NapiError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            debug!(path = %path.display(), "No env file");
            return Ok(None);
        }
        Err(source) => {
            return Err(NapiError::MalformedEnvFile {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut found = None;
    for item in iter {
        let (name, value) = item.map_err(|source| NapiError::MalformedEnvFile {
            path: path.to_path_buf(),
            source,
        })?;
        if name == key {
            found = Some(value);
        }
    }
    Ok(found.filter(|v| !v.is_empty()))
}
