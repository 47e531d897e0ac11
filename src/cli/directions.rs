//! Directions command handler

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::format::Report;
use crate::geo::{resolve_route, GebetaClient};
use clap::Args;

/// Directions command arguments
#[derive(Args)]
pub struct DirectionsArgs {
    /// Starting position as "lat,lng"
    #[arg(long)]
    pub from: Coordinates,

    /// Destination as "lat,lng"
    #[arg(long)]
    pub to: Coordinates,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the directions command
pub async fn run(args: DirectionsArgs) -> Result<()> {
    let config = Config::load()?;
    config.require_api_key()?;

    let client = GebetaClient::new(&config.provider)?;
    let route = resolve_route(&client, Some(args.from), args.to).await?;

    let report = Report::Route {
        origin: args.from,
        destination: args.to,
        route,
    };
    super::emit(&report, &args.format, args.output.as_deref())
}
