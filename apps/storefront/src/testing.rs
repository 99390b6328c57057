//! Hand-written collaborators for exercising the cart store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use storefront_catalog::{CatalogError, CatalogResult, ProductLookup, StockLookup};
use storefront_core::{Product, ProductId, Stock};
use storefront_storage::{KeyValueStore, StorageError, StorageResult};

use crate::notify::RecordingNotifier;
use crate::state::{CartDeps, CartOptions, CartState};

pub(crate) fn shoe() -> Product {
    Product::new(1, "Shoe", 179.9, "https://img/shoe.jpg")
}

pub(crate) fn boot() -> Product {
    Product::new(2, "Boot", 139.9, "https://img/boot.jpg")
}

pub(crate) fn sandal() -> Product {
    Product::new(3, "Sandal", 99.9, "https://img/sandal.jpg")
}

/// In-process product and stock lookups with call counters.
pub(crate) struct FakeCatalog {
    products: Vec<Product>,
    stock: Mutex<HashMap<ProductId, i64>>,
    unreachable: bool,
    yield_on_lookup: bool,
    product_calls: AtomicUsize,
    stock_calls: AtomicUsize,
}

impl FakeCatalog {
    /// Shoe, Boot and Sandal, five of each in stock.
    pub(crate) fn new() -> Self {
        let products = vec![shoe(), boot(), sandal()];
        let stock = products.iter().map(|p| (p.id, 5)).collect();
        FakeCatalog {
            products,
            stock: Mutex::new(stock),
            unreachable: false,
            yield_on_lookup: false,
            product_calls: AtomicUsize::new(0),
            stock_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_stock(self, id: ProductId, amount: i64) -> Self {
        self.stock.lock().unwrap().insert(id, amount);
        self
    }

    /// Every lookup fails as if the service were down.
    pub(crate) fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Every lookup yields to the scheduler once before answering.
    pub(crate) fn yielding(mut self) -> Self {
        self.yield_on_lookup = true;
        self
    }

    pub(crate) fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn stock_calls(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> CatalogResult<()> {
        if self.yield_on_lookup {
            tokio::task::yield_now().await;
        }
        if self.unreachable {
            return Err(CatalogError::Connection("Cannot connect to fake".into()));
        }
        Ok(())
    }

    fn not_found(path: String) -> CatalogError {
        CatalogError::Status {
            status: 404,
            url: path,
        }
    }
}

#[async_trait]
impl ProductLookup for FakeCatalog {
    async fn product(&self, id: ProductId) -> CatalogResult<Product> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("products/{}", id)))
    }

    async fn products(&self) -> CatalogResult<Vec<Product>> {
        self.enter().await?;
        Ok(self.products.clone())
    }
}

#[async_trait]
impl StockLookup for FakeCatalog {
    async fn stock(&self, id: ProductId) -> CatalogResult<Stock> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        let amount = self.stock.lock().unwrap().get(&id).copied();
        amount
            .map(|amount| Stock { id, amount })
            .ok_or_else(|| Self::not_found(format!("stock/{}", id)))
    }
}

/// Store whose writes always fail.
pub(crate) struct ReadOnlyStore {
    blob: Option<String>,
}

impl ReadOnlyStore {
    pub(crate) fn new(blob: Option<String>) -> Self {
        ReadOnlyStore { blob }
    }
}

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(self.blob.clone())
    }

    async fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::QueryFailed("attempt to write a readonly database".into()))
    }

    async fn remove(&self, _key: &str) -> StorageResult<bool> {
        Err(StorageError::QueryFailed("attempt to write a readonly database".into()))
    }
}

/// Builds a cart store over the given collaborators.
pub(crate) async fn cart_state(
    catalog: Arc<FakeCatalog>,
    storage: Arc<dyn KeyValueStore>,
    notifier: Arc<RecordingNotifier>,
    serialize_operations: bool,
) -> CartState {
    let deps = CartDeps {
        products: catalog.clone(),
        stock: catalog,
        storage,
        notifier,
    };
    let options = CartOptions {
        serialize_operations,
        ..CartOptions::default()
    };
    CartState::restore(deps, options).await.unwrap()
}
