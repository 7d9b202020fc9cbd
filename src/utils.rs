//! Small helpers for logging and filesystem pre-flight checks.

use crate::error::NapiError;
use std::path::Path;
use tracing::{debug, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary) with
/// `"…(+N bytes)"` appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure the directory that will hold `path` already exists.
///
/// A bare file name has no parent component and refers to the working
/// directory, which always passes. The directory is never created.
///
/// # Errors
///
/// [`NapiError::InvalidInputPath`] naming the missing directory.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn ensure_parent_dir_exists(path: &Path) -> Result<(), NapiError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    if parent.is_dir() {
        debug!(dir = %parent.display(), "Output directory exists");
        Ok(())
    } else {
        Err(NapiError::InvalidInputPath(parent.to_path_buf()))
    }
}
