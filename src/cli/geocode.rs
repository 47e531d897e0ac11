//! Geocode command handler

use crate::config::Config;
use crate::error::Result;
use crate::format::Report;
use crate::geo::{GebetaClient, Geocoder};
use clap::Args;

/// Geocode command arguments
#[derive(Args)]
pub struct GeocodeArgs {
    /// Place name to search for
    pub query: String,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the geocode command
pub async fn run(args: GeocodeArgs) -> Result<()> {
    let config = Config::load()?;
    config.require_api_key()?;

    let client = GebetaClient::new(&config.provider)?;
    let outcome = client.geocode(&args.query).await?;

    let report = Report::Geocode {
        query: args.query,
        outcome,
    };
    super::emit(&report, &args.format, args.output.as_deref())
}
