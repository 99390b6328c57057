//! # Error Types
//!
//! Domain errors raised by cart transitions.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core      CartError      (this file)                       │
//! │  storefront-storage   StorageError   key-value store failures          │
//! │  storefront-catalog   CatalogError   lookup/transport failures         │
//! │  apps/storefront      AppError       what the operation boundary sees  │
//! │                                                                         │
//! │  Flow: CartError ─┐                                                    │
//! │     StorageError ─┼─► AppError ─► toast message                        │
//! │     CatalogError ─┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

/// Cart business-rule violations and blob (de)serialization failures.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product has no entry in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// The product already has an entry; entries are unique by id.
    #[error("Product {0} is already in the cart")]
    AlreadyInCart(ProductId),

    /// The requested quantity exceeds what the stock service reports.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart has Shoe x1, stock says 1 available
    ///      │
    ///      ▼
    /// add_product(Shoe)
    ///      │
    ///      ▼
    /// OutOfStock { product_id: 1, available: 1, requested: 2 }
    ///      │
    ///      ▼
    /// Toast: "Requested quantity out of stock"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    OutOfStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// The cart could not be encoded for persistence.
    #[error("Failed to serialize cart: {0}")]
    Serialization(String),

    /// The persisted blob is not a valid cart.
    #[error("Persisted cart is malformed: {0}")]
    Malformed(String),
}

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;
