//! # Command Line Interface
//!
//! Each invocation restores the cart, runs one command and exits. Toasts
//! raised by the command are printed to stderr by the caller.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use storefront_catalog::ProductLookup;
use storefront_core::{ProductId, UpdateProductAmount};

use crate::config::CurrencySettings;
use crate::error::AppResult;
use crate::listing::load_listing;
use crate::state::CartState;

#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Storefront shopping cart")]
pub struct Cli {
    /// Path to a storefront.toml config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List products with the quantity already in the cart.
    Products,
    /// Show the cart and its totals.
    Cart,
    /// Add one unit of a product.
    Add { id: ProductId },
    /// Remove a product from the cart.
    Remove { id: ProductId },
    /// Set the quantity of a product in the cart.
    Update {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

/// Runs one command, writing its report to `out`.
pub async fn execute(
    command: Command,
    cart: &CartState,
    catalog: &dyn ProductLookup,
    currency: &CurrencySettings,
    out: &mut impl Write,
) -> AppResult<()> {
    match command {
        Command::Products => {
            let listing = load_listing(catalog, &cart.snapshot(), currency).await?;
            for entry in listing {
                writeln!(
                    out,
                    "#{:<4} {:<32} {:>12}  in cart: {}",
                    entry.product.id, entry.product.title, entry.price_formatted, entry.cart_amount
                )?;
            }
            return Ok(());
        }
        Command::Cart => {}
        Command::Add { id } => cart.add_product(id).await,
        Command::Remove { id } => cart.remove_product(id).await,
        Command::Update { id, amount } => {
            cart.update_product_amount(UpdateProductAmount::new(id, amount))
                .await
        }
    }

    write_cart(cart, currency, out)
}

fn write_cart(cart: &CartState, currency: &CurrencySettings, out: &mut impl Write) -> AppResult<()> {
    let snapshot = cart.snapshot();
    if snapshot.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    for item in snapshot.items() {
        let amount = item.amount.unwrap_or(0);
        writeln!(
            out,
            "#{:<4} {:<32} x{:<4} {:>12}",
            item.id,
            item.title,
            amount,
            currency.format(item.price_cents().saturating_mul(amount))
        )?;
    }

    let summary = snapshot.summary();
    writeln!(
        out,
        "{} item(s), {} unit(s), subtotal {}",
        summary.item_count,
        summary.total_quantity,
        currency.format(summary.subtotal_cents)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::notify::{RecordingNotifier, OUT_OF_STOCK};
    use crate::testing::{cart_state, FakeCatalog};
    use storefront_storage::MemoryStore;

    async fn run(catalog: &Arc<FakeCatalog>, state: &CartState, command: Command) -> String {
        let mut out = Vec::new();
        execute(
            command,
            state,
            catalog.as_ref(),
            &CurrencySettings::default(),
            &mut out,
        )
        .await
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_update_with_negative_amount() {
        let cli = Cli::try_parse_from(["storefront", "update", "1", "-2"]).unwrap();
        assert!(matches!(cli.command, Command::Update { id: 1, amount: -2 }));

        let cli = Cli::try_parse_from(["storefront", "--config", "/tmp/s.toml", "cart"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.toml")));
    }

    #[tokio::test]
    async fn test_add_then_show_cart() {
        let catalog = Arc::new(FakeCatalog::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let state = cart_state(
            catalog.clone(),
            Arc::new(MemoryStore::new()),
            notifier.clone(),
            false,
        )
        .await;

        run(&catalog, &state, Command::Add { id: 1 }).await;
        let output = run(&catalog, &state, Command::Add { id: 1 }).await;

        assert!(output.contains("Shoe"));
        assert!(output.contains("x2"));
        assert!(output.contains("1 item(s), 2 unit(s), subtotal $359.80"));
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_products_show_cart_amounts() {
        let catalog = Arc::new(FakeCatalog::new());
        let state = cart_state(
            catalog.clone(),
            Arc::new(MemoryStore::new()),
            Arc::new(RecordingNotifier::new()),
            false,
        )
        .await;

        run(&catalog, &state, Command::Add { id: 2 }).await;
        let output = run(&catalog, &state, Command::Products).await;

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Shoe") && lines[0].ends_with("in cart: 0"));
        assert!(lines[1].contains("$139.90") && lines[1].ends_with("in cart: 1"));
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_toast() {
        let catalog = Arc::new(FakeCatalog::new().with_stock(1, 2));
        let notifier = Arc::new(RecordingNotifier::new());
        let state = cart_state(
            catalog.clone(),
            Arc::new(MemoryStore::new()),
            notifier.clone(),
            false,
        )
        .await;

        run(&catalog, &state, Command::Add { id: 1 }).await;
        let output = run(&catalog, &state, Command::Update { id: 1, amount: 9 }).await;

        assert!(output.contains("x1"));
        assert_eq!(notifier.messages(), vec![OUT_OF_STOCK]);
    }

    #[tokio::test]
    async fn test_empty_cart() {
        let catalog = Arc::new(FakeCatalog::new());
        let state = cart_state(
            catalog.clone(),
            Arc::new(MemoryStore::new()),
            Arc::new(RecordingNotifier::new()),
            false,
        )
        .await;

        assert_eq!(run(&catalog, &state, Command::Cart).await, "Cart is empty\n");
    }
}
