//! # Catalog Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Configuration      │  Transport           │  Response                  │
//! │                     │                      │                            │
//! │  InvalidUrl         │  Connection          │  Status (4xx / 5xx)        │
//! │                     │  Http                │  Decode                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Lookup failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Base URL is not a usable http(s) URL.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// The lookup service could not be reached.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The service answered with a non-success status.
    #[error("Catalog returned {status} for {url}")]
    Status { status: u16, url: String },

    /// The response body is not the expected record.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Any other HTTP client failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidUrl(err.to_string())
    }
}

/// Result type alias for lookups.
pub type CatalogResult<T> = Result<T, CatalogError>;
