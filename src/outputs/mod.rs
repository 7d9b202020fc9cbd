//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: writes the accumulated articles to a single JSON array file

pub mod json;
