//! # App Error Type
//!
//! Unified error type for the cart store and the CLI.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  CartState::add_product(id)                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  try_add_product → AppResult<()>                                 │  │
//! │  │         │                                                        │  │
//! │  │  Lookup failed? ─── CatalogError ──┐                             │  │
//! │  │  Rule violated? ─── CartError ─────┼──► AppError                 │  │
//! │  │  Write failed?  ─── StorageError ──┘        │                    │  │
//! │  └─────────────────────────────────────────────┼────────────────────┘  │
//! │                                                ▼                        │
//! │                   out of stock? ── yes ──► "Requested quantity out..."  │
//! │                                 └─ no ───► per-operation generic toast  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use storefront_catalog::CatalogError;
use storefront_core::CartError;
use storefront_storage::StorageError;

/// Application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart rule violation or blob (de)serialization failure.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Product or stock lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Key-value store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration values are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// True for the one failure that gets its own toast.
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, AppError::Cart(CartError::OutOfStock { .. }))
    }
}

/// Result type alias for app operations.
pub type AppResult<T> = Result<T, AppError>;
