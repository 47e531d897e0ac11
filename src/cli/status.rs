//! Status command handler
//!
//! Reports whether a server is answering at the configured address.

use crate::config::Config;
use crate::error::Result;
use crate::server::routes::StatusResponse;
use clap::Args;
use std::time::Duration;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Server address to probe instead of the configured one (host:port)
    #[arg(long)]
    pub addr: Option<String>,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;
    let addr = args.addr.unwrap_or_else(|| config.server_addr());

    println!("workspot v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Database: {}", config.database.url);
    println!(
        "Provider key: {}",
        if config.provider.api_key.is_empty() {
            "not configured"
        } else {
            "configured"
        }
    );
    println!();

    check_server_status(&addr).await;
    Ok(())
}

/// Check if the server is running
async fn check_server_status(addr: &str) {
    let url = format!("http://{}/api/status", addr);
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            println!("Server: UNKNOWN ({})", e);
            return;
        }
    };

    match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => {
            println!("Server: RUNNING on {}", addr);
            if let Ok(status) = response.json::<StatusResponse>().await {
                println!("  Version: {}", status.version);
                println!(
                    "  Database: {}",
                    if status.database { "OK" } else { "UNREACHABLE" }
                );
            }
        }
        Ok(response) => {
            println!("Server: ERROR (status {})", response.status());
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", addr);
        }
    }
}
