//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod directions;
pub mod geocode;
pub mod serve;
pub mod status;
pub mod user;

use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, Report};
use clap::{Parser, Subcommand};

/// Directory of laptop-friendly places
#[derive(Parser)]
#[command(name = "workspot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Manage administrator accounts
    User(user::UserArgs),

    /// Look up locations by name
    Geocode(geocode::GeocodeArgs),

    /// Fetch a route between two positions
    Directions(directions::DirectionsArgs),

    /// Show server status
    Status(status::StatusArgs),
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::User(args) => user::run(args).await,
        Commands::Geocode(args) => geocode::run(args).await,
        Commands::Directions(args) => directions::run(args).await,
        Commands::Status(args) => status::run(args).await,
    }
}

/// Format a report and print it, or write it to `output`
pub(crate) fn emit(report: &Report, format: &str, output: Option<&str>) -> Result<()> {
    let formatter = get_formatter(format).ok_or_else(|| {
        let names: Vec<String> = available_formats().into_iter().map(|f| f.name).collect();
        Error::Config(format!(
            "Unknown format: {} (available: {})",
            format,
            names.join(", ")
        ))
    })?;
    let rendered = formatter.format(report)?;

    if let Some(path) = output {
        std::fs::write(path, &rendered)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", rendered);
    }

    Ok(())
}
