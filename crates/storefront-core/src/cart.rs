//! # Cart
//!
//! The ordered, unique-by-id list of cart entries and its transitions.
//!
//! ## Transitions Are Pure
//! Every transition borrows the current cart and returns a brand-new one.
//! The cart store computes the next cart completely, persists it, and only
//! then swaps it in, so a failed operation never leaves a half-applied cart.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  Operation            Transition                Rejects with            │
//! │  ─────────            ──────────                ────────────            │
//! │                                                                         │
//! │  add (new product) ─► append(product) ────────► AlreadyInCart          │
//! │                                                                         │
//! │  add (in cart) ─────► increment(id, stock) ───► NotInCart, OutOfStock  │
//! │                                                                         │
//! │  remove ────────────► remove(id) ─────────────► NotInCart              │
//! │                                                                         │
//! │  update amount ─────► set_amount(id, n, stock)► OutOfStock             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CartError, CartResult};
use crate::types::{Product, ProductId, Stock};

/// The shopping cart.
///
/// ## Invariants
/// - Entries are unique by `id`
/// - Every entry's `amount` is positive
/// - Insertion order is preserved
///
/// Serializes transparently as a JSON array of products, which is exactly
/// the persisted blob format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from entries taken as-is.
    ///
    /// Entries are not checked for duplicate ids, matching what `from_json`
    /// accepts.
    pub fn from_items(items: Vec<Product>) -> Self {
        Cart { items }
    }

    /// Parses a persisted cart blob.
    ///
    /// The blob is taken verbatim: there is no schema migration.
    pub fn from_json(blob: &str) -> CartResult<Self> {
        serde_json::from_str(blob).map_err(|e| CartError::Malformed(e.to_string()))
    }

    /// Encodes the cart as its persisted blob.
    pub fn to_json(&self) -> CartResult<String> {
        serde_json::to_string(self).map_err(|e| CartError::Serialization(e.to_string()))
    }

    /// Entries in insertion order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Returns the entry for `id`, if any.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Checks whether the cart holds an entry for `id`.
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|p| p.id == id)
    }

    /// Number of unique entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Appends a product that is not yet in the cart, with amount 1.
    pub fn append(&self, product: Product) -> CartResult<Cart> {
        if self.contains(product.id) {
            return Err(CartError::AlreadyInCart(product.id));
        }

        let mut items = self.items.clone();
        items.push(product.with_amount(1));
        Ok(Cart { items })
    }

    /// Increments an existing entry by exactly one unit.
    ///
    /// ## Stock Check
    /// The entry's current amount (taken as 1 when absent) must be strictly
    /// below `stock.amount`. The increment itself counts an absent amount
    /// as 0, so such an entry ends up at 1.
    pub fn increment(&self, id: ProductId, stock: &Stock) -> CartResult<Cart> {
        let entry = self.get(id).ok_or(CartError::NotInCart(id))?;

        let current = entry.amount.unwrap_or(1);
        if current >= stock.amount {
            return Err(CartError::OutOfStock {
                product_id: id,
                available: stock.amount,
                requested: current.saturating_add(1),
            });
        }

        Ok(self.map_entry(id, |p| p.amount = Some(p.amount.unwrap_or(0) + 1)))
    }

    /// Removes the entry for `id`.
    pub fn remove(&self, id: ProductId) -> CartResult<Cart> {
        if !self.contains(id) {
            return Err(CartError::NotInCart(id));
        }

        let items = self.items.iter().filter(|p| p.id != id).cloned().collect();
        Ok(Cart { items })
    }

    /// Sets the entry for `id` to exactly `amount` units.
    ///
    /// ## Behavior
    /// - `amount > stock.amount`: rejected with `OutOfStock`
    /// - No entry for `id`: returns an unchanged copy (not an error)
    ///
    /// Callers are expected to drop non-positive amounts before calling.
    pub fn set_amount(&self, id: ProductId, amount: i64, stock: &Stock) -> CartResult<Cart> {
        if amount > stock.amount {
            return Err(CartError::OutOfStock {
                product_id: id,
                available: stock.amount,
                requested: amount,
            });
        }

        Ok(self.map_entry(id, |p| p.amount = Some(amount)))
    }

    fn map_entry(&self, id: ProductId, update: impl Fn(&mut Product)) -> Cart {
        let items = self
            .items
            .iter()
            .cloned()
            .map(|mut p| {
                if p.id == id {
                    update(&mut p);
                }
                p
            })
            .collect();
        Cart { items }
    }

    // =========================================================================
    // Read Helpers
    // =========================================================================

    /// Quantity per product, as shown next to each listing entry.
    pub fn items_amount(&self) -> BTreeMap<ProductId, i64> {
        self.items
            .iter()
            .map(|p| (p.id, p.amount.unwrap_or(0)))
            .collect()
    }

    /// Totals for display.
    pub fn summary(&self) -> CartSummary {
        CartSummary::from(self)
    }
}

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        let quantity = |p: &Product| p.amount.unwrap_or(0);
        CartSummary {
            item_count: cart.len(),
            total_quantity: cart
                .items
                .iter()
                .fold(0_i64, |acc, p| acc.saturating_add(quantity(p))),
            subtotal_cents: cart.items.iter().fold(0_i64, |acc, p| {
                acc.saturating_add(p.price_cents().saturating_mul(quantity(p)))
            }),
        }
    }
}
