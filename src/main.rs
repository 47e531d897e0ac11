//! workspot CLI entry point
//!
//! Directory of laptop-friendly places - CLI + web API

use workspot::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
