//! # Storefront CLI Entry Point
//!
//! ```text
//! storefront products              list products with cart amounts
//! storefront cart                  show the cart
//! storefront add <id>              add one unit
//! storefront remove <id>           remove the entry
//! storefront update <id> <amount>  set the quantity
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use storefront_lib::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    storefront_lib::init_tracing();

    match storefront_lib::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "storefront failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
