//! # storefront-catalog: Product & Stock Lookups
//!
//! The cart store never talks HTTP directly. It holds two collaborators,
//! [`ProductLookup`] and [`StockLookup`], and this crate provides the
//! reqwest-backed implementation of both.
//!
//! ## Lookup Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Lookup API                                      │
//! │                                                                         │
//! │  CartState::add_product ─────┬──► GET {base}/products/{id} → Product    │
//! │                              └──► GET {base}/stock/{id}    → Stock      │
//! │                                                                         │
//! │  CartState::update_amount ───────► GET {base}/stock/{id}    → Stock     │
//! │                                                                         │
//! │  Listing consumer ───────────────► GET {base}/products      → [Product] │
//! │                                                                         │
//! │  Any non-2xx, transport failure or undecodable body → CatalogError      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_catalog::{CatalogConfig, HttpCatalog, StockLookup};
//!
//! let catalog = HttpCatalog::new(CatalogConfig::new("http://localhost:3333"))?;
//! let stock = catalog.stock(1).await?;
//! ```

pub mod client;
pub mod error;

pub use client::{CatalogConfig, HttpCatalog};
pub use error::{CatalogError, CatalogResult};

use async_trait::async_trait;
use storefront_core::{Product, ProductId, Stock};

/// Answers "what are the catalog attributes of product P".
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Fetches one product.
    async fn product(&self, id: ProductId) -> CatalogResult<Product>;

    /// Fetches the full listing.
    async fn products(&self) -> CatalogResult<Vec<Product>>;
}

/// Answers "how many units of product P are available".
#[async_trait]
pub trait StockLookup: Send + Sync {
    /// Fetches the stock record for one product.
    async fn stock(&self, id: ProductId) -> CatalogResult<Stock>;
}
