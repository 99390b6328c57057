//! # Cart State
//!
//! Holds the committed cart and runs the three cart operations against the
//! lookup, storage and notification collaborators.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Caller                   CartState                  Collaborators      │
//! │  ──────                   ─────────                  ─────────────      │
//! │                                                                         │
//! │  add_product(id) ──────► product lookup ───────────► GET products/{id}  │
//! │                          in cart? stock lookup ────► GET stock/{id}     │
//! │                          append / increment                             │
//! │                                                                         │
//! │  remove_product(id) ───► remove                                         │
//! │                                                                         │
//! │  update_product_amount ► amount <= 0? return                            │
//! │                          stock lookup ─────────────► GET stock/{id}     │
//! │                          set_amount                                     │
//! │                                                                         │
//! │  every success ────────► commit: to_json → storage.set → swap memory    │
//! │  every failure ────────► notifier.notify(toast), cart untouched         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overlapping Operations
//! Each operation computes its new cart from the snapshot it took on entry,
//! before any lookup, so two overlapping operations can drop one another's
//! change (last commit wins).
//! With `serialize_operations` every operation holds an async gate for its
//! full duration instead.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use storefront_catalog::{ProductLookup, StockLookup};
use storefront_core::{Cart, ProductId, UpdateProductAmount, DEFAULT_CART_KEY};
use storefront_storage::KeyValueStore;

use crate::error::{AppError, AppResult};
use crate::notify::{Notifier, Toast, ADD_FAILED, OUT_OF_STOCK, REMOVE_FAILED, UPDATE_FAILED};

/// Collaborators injected into the cart store.
#[derive(Clone)]
pub struct CartDeps {
    pub products: Arc<dyn ProductLookup>,
    pub stock: Arc<dyn StockLookup>,
    pub storage: Arc<dyn KeyValueStore>,
    pub notifier: Arc<dyn Notifier>,
}

#[derive(Debug, Clone)]
pub struct CartOptions {
    /// Storage key the cart blob lives under.
    pub cart_key: String,

    /// Gate overlapping operations so they run one after another.
    pub serialize_operations: bool,
}

impl Default for CartOptions {
    fn default() -> Self {
        CartOptions {
            cart_key: DEFAULT_CART_KEY.to_string(),
            serialize_operations: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    fn failure_message(self) -> &'static str {
        match self {
            CartOperation::Add => ADD_FAILED,
            CartOperation::Remove => REMOVE_FAILED,
            CartOperation::UpdateAmount => UPDATE_FAILED,
        }
    }
}

/// The cart store.
pub struct CartState {
    cart: Mutex<Cart>,
    products: Arc<dyn ProductLookup>,
    stock: Arc<dyn StockLookup>,
    storage: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    cart_key: String,
    gate: Option<tokio::sync::Mutex<()>>,
}

impl CartState {
    /// Creates the store from whatever is persisted under the cart key.
    ///
    /// ## Errors
    /// A persisted blob that doesn't parse as a cart is returned as
    /// `CartError::Malformed`; storage failures propagate as-is.
    pub async fn restore(deps: CartDeps, options: CartOptions) -> AppResult<Self> {
        let cart = match deps.storage.get(&options.cart_key).await? {
            Some(blob) => Cart::from_json(&blob)?,
            None => Cart::new(),
        };

        info!(
            key = %options.cart_key,
            items = cart.len(),
            serialize_operations = options.serialize_operations,
            "Cart restored"
        );

        Ok(CartState {
            cart: Mutex::new(cart),
            products: deps.products,
            stock: deps.stock,
            storage: deps.storage,
            notifier: deps.notifier,
            cart_key: options.cart_key,
            gate: options.serialize_operations.then(|| tokio::sync::Mutex::new(())),
        })
    }

    /// Returns a copy of the committed cart.
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    /// Executes a function with read access to the committed cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let summary = cart_state.with_cart(|cart| cart.summary());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.lock())
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds one unit of a product, appending it when not yet in the cart.
    pub async fn add_product(&self, id: ProductId) {
        if let Err(err) = self.try_add_product(id).await {
            self.report(CartOperation::Add, id, err);
        }
    }

    /// Removes a product's entry.
    pub async fn remove_product(&self, id: ProductId) {
        if let Err(err) = self.try_remove_product(id).await {
            self.report(CartOperation::Remove, id, err);
        }
    }

    /// Sets a product's quantity. Non-positive amounts are ignored.
    pub async fn update_product_amount(&self, request: UpdateProductAmount) {
        if request.amount <= 0 {
            debug!(
                product_id = %request.product_id,
                amount = request.amount,
                "Ignoring non-positive amount"
            );
            return;
        }

        if let Err(err) = self.try_update_product_amount(request).await {
            self.report(CartOperation::UpdateAmount, request.product_id, err);
        }
    }

    async fn try_add_product(&self, id: ProductId) -> AppResult<()> {
        let _gate = self.enter().await;
        let cart = self.snapshot();
        debug!(product_id = %id, "Adding product");

        // Fetched even when the product is already in the cart.
        let product = self.products.product(id).await?;

        let next = if cart.contains(id) {
            let stock = self.stock.stock(id).await?;
            cart.increment(id, &stock)?
        } else {
            cart.append(product)?
        };

        self.commit(next).await
    }

    async fn try_remove_product(&self, id: ProductId) -> AppResult<()> {
        let _gate = self.enter().await;
        debug!(product_id = %id, "Removing product");

        let next = self.snapshot().remove(id)?;
        self.commit(next).await
    }

    async fn try_update_product_amount(&self, request: UpdateProductAmount) -> AppResult<()> {
        let _gate = self.enter().await;
        let cart = self.snapshot();
        debug!(
            product_id = %request.product_id,
            amount = request.amount,
            "Updating product amount"
        );

        let stock = self.stock.stock(request.product_id).await?;
        let next = cart.set_amount(request.product_id, request.amount, &stock)?;

        self.commit(next).await
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Persists `next`, then makes it the committed cart.
    async fn commit(&self, next: Cart) -> AppResult<()> {
        let blob = next.to_json()?;
        self.storage.set(&self.cart_key, &blob).await?;

        let items = next.len();
        *self.lock() = next;

        info!(key = %self.cart_key, items, "Cart committed");
        Ok(())
    }

    fn report(&self, operation: CartOperation, id: ProductId, err: AppError) {
        let message = if err.is_out_of_stock() {
            OUT_OF_STOCK
        } else {
            operation.failure_message()
        };

        warn!(?operation, product_id = %id, error = %err, "Cart operation rejected");
        self.notifier.notify(Toast::error(message));
    }

    async fn enter(&self) -> Option<tokio::sync::MutexGuard<'_, ()>> {
        match &self.gate {
            Some(gate) => Some(gate.lock().await),
            None => None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
