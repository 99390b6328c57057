//! # Domain Types
//!
//! Records exchanged with the lookup API and stored in the cart.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌─────────────────────┐                │
//! │  │      Product        │        │       Stock         │                │
//! │  │  ─────────────────  │        │  ─────────────────  │                │
//! │  │  id      (key)      │        │  id                 │                │
//! │  │  title              │        │  amount (available) │                │
//! │  │  price              │        └─────────────────────┘                │
//! │  │  image  (url)       │                                                │
//! │  │  amount (in cart)   │  ◄── only set while the product is in a cart   │
//! │  └─────────────────────┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of a catalog product.
pub type ProductId = u64;

// =============================================================================
// Product
// =============================================================================

/// A catalog product, optionally carrying its quantity in the cart.
///
/// The JSON shape matches the lookup API and the persisted cart blob:
/// `{"id":1,"title":"Shoe","price":10.0,"image":"...","amount":2}`.
/// `amount` is omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identity key.
    pub id: ProductId,

    /// Display title.
    pub title: String,

    /// Unit price as served by the catalog.
    pub price: f64,

    /// Image URL.
    pub image: String,

    /// Quantity currently in the cart. `None` outside the cart context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

impl Product {
    /// Creates a product without a cart amount.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id,
            title: title.into(),
            price,
            image: image.into(),
            amount: None,
        }
    }

    /// Returns a copy carrying the given cart amount.
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Price in the smallest currency unit, rounded half away from zero.
    pub fn price_cents(&self) -> i64 {
        (self.price * 100.0).round() as i64
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Units of a product available for sale. Read-only to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: i64,
}

// =============================================================================
// Operation Inputs
// =============================================================================

/// Request to set a cart entry to an absolute quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        UpdateProductAmount { product_id, amount }
    }
}
