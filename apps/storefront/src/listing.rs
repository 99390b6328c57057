//! # Product Listing
//!
//! Joins the catalog listing with the committed cart: each product gets a
//! display price and the quantity currently in the cart.

use serde::Serialize;
use tracing::debug;

use storefront_catalog::ProductLookup;
use storefront_core::{Cart, Product};

use crate::config::CurrencySettings;
use crate::error::AppResult;

/// One product as shown on the listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    #[serde(flatten)]
    pub product: Product,

    /// Price formatted with the configured currency.
    pub price_formatted: String,

    /// Units of this product in the cart; 0 when absent.
    pub cart_amount: i64,
}

/// Fetches every product and annotates it against `cart`.
pub async fn load_listing(
    catalog: &dyn ProductLookup,
    cart: &Cart,
    currency: &CurrencySettings,
) -> AppResult<Vec<ListingEntry>> {
    let products = catalog.products().await?;
    let amounts = cart.items_amount();

    let entries: Vec<ListingEntry> = products
        .into_iter()
        .map(|product| ListingEntry {
            price_formatted: currency.format(product.price_cents()),
            cart_amount: amounts.get(&product.id).copied().unwrap_or(0),
            product,
        })
        .collect();

    debug!(count = entries.len(), "Listing loaded");
    Ok(entries)
}
