//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for docsite-filter operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a documentation page or site cannot be indexed.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Page file not found at the expected path.
    #[error("Page not found at {}", path.display())]
    NotFound { path: PathBuf },
    /// Failed to read the page from disk.
    #[error("Failed to read page {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A configured layout selector is not valid CSS.
    #[error("Invalid {field} selector `{selector}`: {message}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        message: String,
    },
}

/// Error returned when a placeholder value cannot be fetched.
///
/// These never reach the user: expansion logs them and leaves the placeholder text in place.
#[derive(Debug, thiserror::Error)]
pub enum PlaceholderError {
    #[error("Release listing request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Release listing for '{repository}' is empty")]
    NoReleases { repository: String },
}
