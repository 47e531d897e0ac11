//! User command handler
//!
//! Administrator accounts are created here; there is no public sign-up.

use crate::auth::UserStore;
use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use clap::{Args, Subcommand};

/// User command arguments
#[derive(Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Register an administrator
    Add {
        /// Display name
        #[arg(long)]
        name: String,

        /// Sign-in email
        #[arg(long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(long)]
        password: String,
    },
}

/// Run the user command
pub async fn run(args: UserArgs) -> Result<()> {
    let config = Config::load()?;
    let db = Database::connect(&config.database).await?;
    let users = UserStore::new(db);

    match args.command {
        UserCommand::Add {
            name,
            email,
            password,
        } => {
            let record = users.register(&name, &email, &password).await?;
            println!("Registered {} <{}> ({})", record.name, record.email, record.id);
        }
    }

    Ok(())
}
