//! # State Module
//!
//! The cart store is an owned value, shared as `Arc<CartState>` by the
//! listing consumer and the CLI.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         CartState                                │  │
//! │  │                                                                  │  │
//! │  │  Mutex<Cart> ◄── snapshot / swap only, never held across .await  │  │
//! │  │                                                                  │  │
//! │  │  Arc<dyn ProductLookup>   Arc<dyn StockLookup>                   │  │
//! │  │  Arc<dyn KeyValueStore>   Arc<dyn Notifier>                      │  │
//! │  │                                                                  │  │
//! │  │  Option<tokio::sync::Mutex<()>> ◄── cart.serialize_operations    │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;

pub use cart::{CartDeps, CartOptions, CartState};
