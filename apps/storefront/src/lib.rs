//! # Storefront Library
//!
//! Cart store, listing consumer and CLI wiring for the storefront.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & wiring)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── cart.rs     ◄─── CartState: add / remove / update amount
//! ├── listing.rs      ◄─── Product listing annotated with cart amounts
//! ├── notify.rs       ◄─── Toasts and notifiers
//! ├── config.rs       ◄─── AppConfig (defaults → TOML → env)
//! ├── cli.rs          ◄─── clap commands
//! └── error.rs        ◄─── AppError
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod listing;
pub mod notify;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use storefront_catalog::HttpCatalog;
use storefront_storage::{SqliteStore, StorageError};

use cli::Cli;
use config::AppConfig;
use error::AppResult;
use notify::{RecordingNotifier, TracingNotifier};
use state::{CartDeps, CartState};

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Invocation                                        │
/// │                                                                         │
/// │  1. Load AppConfig ───────────────────────────────────────────────────► │
/// │     • --config or platform config dir, then STOREFRONT_* overrides      │
/// │                                                                         │
/// │  2. Open Collaborators ───────────────────────────────────────────────► │
/// │     • HttpCatalog for product and stock lookups                         │
/// │     • SqliteStore (WAL, migrations applied, health-checked)             │
/// │                                                                         │
/// │  3. Restore CartState from the cart key ──────────────────────────────► │
/// │                                                                         │
/// │  4. Execute the command, print the report to stdout ──────────────────► │
/// │                                                                         │
/// │  5. Print toasts to stderr; any toast means a failing exit code ──────► │
/// │     • toasts are also logged through TracingNotifier                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<ExitCode> {
    let config = AppConfig::load(cli.config.clone())?;

    let catalog = Arc::new(HttpCatalog::new(config.catalog_config())?);
    info!(base_url = %catalog.base_url(), "Starting storefront");

    let storage = Arc::new(SqliteStore::open(config.storage_config()?).await?);
    if !storage.health_check().await {
        return Err(StorageError::ConnectionFailed("store failed its health check".into()).into());
    }

    let notifier = Arc::new(RecordingNotifier::forwarding(Arc::new(TracingNotifier)));

    let deps = CartDeps {
        products: catalog.clone(),
        stock: catalog.clone(),
        storage: storage.clone(),
        notifier: notifier.clone(),
    };
    let cart = CartState::restore(deps, config.cart_options()).await?;

    let mut stdout = std::io::stdout().lock();
    let outcome = cli::execute(
        cli.command,
        &cart,
        catalog.as_ref(),
        &config.currency,
        &mut stdout,
    )
    .await;

    storage.close().await;
    outcome?;

    let toasts = notifier.take();
    for toast in &toasts {
        eprintln!("{}", toast.message);
    }

    Ok(if toasts.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for storefront crates only
/// - Default: INFO, DEBUG for storefront crates
///
/// Logs go to stderr so command output stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .init();
}
