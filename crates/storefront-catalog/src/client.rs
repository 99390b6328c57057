//! # HTTP Catalog Client
//!
//! reqwest implementation of [`ProductLookup`] and [`StockLookup`].
//!
//! No retries: a failed lookup surfaces immediately to the cart operation
//! that issued it. A timeout is only applied when configured.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use storefront_core::{Product, ProductId, Stock};

use crate::error::{CatalogError, CatalogResult};
use crate::{ProductLookup, StockLookup};

/// Catalog client configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base address of the lookup API, e.g. `http://localhost:3333`.
    pub base_url: String,

    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl CatalogConfig {
    /// Creates a configuration without a timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        CatalogConfig {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Lookup client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Builds a client.
    ///
    /// ## Errors
    /// `InvalidUrl` when the base URL doesn't parse or isn't http(s).
    pub fn new(config: CatalogConfig) -> CatalogResult<Self> {
        let parsed = Url::parse(&config.base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidUrl(format!(
                "expected http:// or https://, got: {}",
                config.base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpCatalog {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> CatalogResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "Catalog request");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_connect() {
                CatalogError::Connection(format!("Cannot connect to {}", self.base_url))
            } else {
                CatalogError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ProductLookup for HttpCatalog {
    async fn product(&self, id: ProductId) -> CatalogResult<Product> {
        self.get_json(&format!("products/{}", id)).await
    }

    async fn products(&self) -> CatalogResult<Vec<Product>> {
        let products: Vec<Product> = self.get_json("products").await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }
}

#[async_trait]
impl StockLookup for HttpCatalog {
    async fn stock(&self, id: ProductId) -> CatalogResult<Stock> {
        self.get_json(&format!("stock/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use tokio::net::TcpListener;

    fn fixture() -> Vec<Product> {
        vec![
            Product::new(1, "Shoe", 179.9, "https://img/1.jpg"),
            Product::new(2, "Boot", 139.9, "https://img/2.jpg"),
        ]
    }

    async fn list_products() -> Json<Vec<Product>> {
        Json(fixture())
    }

    async fn product(Path(id): Path<u64>) -> Result<Json<Product>, StatusCode> {
        fixture()
            .into_iter()
            .find(|p| p.id == id)
            .map(Json)
            .ok_or(StatusCode::NOT_FOUND)
    }

    async fn stock(Path(id): Path<u64>) -> Response {
        match id {
            99 => (StatusCode::OK, "not a stock record").into_response(),
            500 => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            _ => Json(Stock { id, amount: 3 }).into_response(),
        }
    }

    /// Serves the lookup API on an ephemeral port and returns its base URL.
    async fn serve() -> String {
        let app = Router::new()
            .route("/products", get(list_products))
            .route("/products/{id}", get(product))
            .route("/stock/{id}", get(stock));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_fetch_product() {
        let catalog = HttpCatalog::new(CatalogConfig::new(serve().await)).unwrap();

        let product = catalog.product(2).await.unwrap();
        assert_eq!(product.title, "Boot");
        assert_eq!(product.amount, None);
    }

    #[tokio::test]
    async fn test_fetch_listing() {
        let catalog = HttpCatalog::new(CatalogConfig::new(serve().await)).unwrap();
        assert_eq!(catalog.products().await.unwrap(), fixture());
    }

    #[tokio::test]
    async fn test_fetch_stock() {
        let catalog = HttpCatalog::new(CatalogConfig::new(serve().await)).unwrap();
        assert_eq!(catalog.stock(1).await.unwrap(), Stock { id: 1, amount: 3 });
    }

    #[tokio::test]
    async fn test_not_found_is_status_error() {
        let catalog = HttpCatalog::new(CatalogConfig::new(serve().await)).unwrap();

        let err = catalog.product(42).await.unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_server_error_is_status_error() {
        let catalog = HttpCatalog::new(CatalogConfig::new(serve().await)).unwrap();

        let err = catalog.stock(500).await.unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let catalog = HttpCatalog::new(CatalogConfig::new(serve().await)).unwrap();

        let err = catalog.stock(99).await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = CatalogConfig::new(format!("http://{}", addr)).timeout(Duration::from_secs(2));
        let catalog = HttpCatalog::new(config).unwrap();

        let err = catalog.stock(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Connection(_)));
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            HttpCatalog::new(CatalogConfig::new("not a url")),
            Err(CatalogError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpCatalog::new(CatalogConfig::new("ftp://example.com")),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let catalog = HttpCatalog::new(CatalogConfig::new("http://localhost:3333/")).unwrap();
        assert_eq!(catalog.base_url(), "http://localhost:3333");
    }
}
