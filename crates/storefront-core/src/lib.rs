//! # storefront-core: Pure Cart Logic
//!
//! This crate holds the storefront's domain types and every cart transition
//! as pure functions. Lookups and persistence live in sibling crates; the
//! cart store in `apps/storefront` wires them together.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Cart Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Listing Consumer / CLI (apps/storefront)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ add / remove / update                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 CartState (apps/storefront)                     │   │
//! │  │   lookups (storefront-catalog) ─ storage (storefront-storage)   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ storefront-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────────┐  ┌───────────┐              │   │
//! │  │   │   types   │  │     cart      │  │   error   │              │   │
//! │  │   │  Product  │  │  Cart         │  │ CartError │              │   │
//! │  │   │  Stock    │  │  transitions  │  │           │              │   │
//! │  │   └───────────┘  └───────────────┘  └───────────┘              │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product and Stock records as served by the lookup API
//! - [`cart`] - The ordered, unique-by-id cart and its transitions
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, Product, Stock};
//!
//! let shoe = Product::new(1, "Shoe", 10.0, "https://img/shoe.png");
//! let cart = Cart::new().append(shoe).unwrap();
//!
//! let stock = Stock { id: 1, amount: 5 };
//! let cart = cart.increment(1, &stock).unwrap();
//!
//! assert_eq!(cart.get(1).and_then(|p| p.amount), Some(2));
//! ```

pub mod cart;
pub mod error;
pub mod types;

pub use cart::{Cart, CartSummary};
pub use error::{CartError, CartResult};
pub use types::*;

/// Default key under which the cart blob is persisted.
pub const DEFAULT_CART_KEY: &str = "@storefront:cart";
