//! Error context extension trait
//!
//! `ResultExt` adds `.context()` and `.with_context()` to any result whose
//! error converts into [`CatexError`], in the manner of `anyhow::Context`
//! but without leaving the library's error type.
//!
//! # Examples
//!
//! ```rust
//! use catex::domain::Result;
//! use catex::domain::context::ResultExt;
//!
//! fn read_snapshot(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_context(|| format!("Failed to read snapshot {path}"))
//! }
//! ```

use crate::domain::errors::CatexError;
use crate::domain::result::Result;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Add context computed only when the result is an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<CatexError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| CatexError::Other(format!("{context}: {}", e.into())))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let base_error = e.into();
            CatexError::Other(format!("{}: {base_error}", f()))
        })
    }
}
