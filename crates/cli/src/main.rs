//! Storehaus CLI - database migrations and admin bootstrap.
//!
//! # Usage
//!
//! ```bash
//! # Apply the shop schema and create the session table
//! storehaus migrate
//!
//! # Create the first admin account
//! storehaus admin create -e ops@example.com -n "Ops" -p 'long-enough-passphrase'
//! ```
//!
//! Both commands read `DATABASE_URL` (a `.env` file is honored).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "storehaus")]
#[command(author, version, about = "Storehaus CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations (schema and session store)
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: Option<String>,

        /// Admin password (at least 12 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                password,
            } => {
                commands::admin::create_user(&email, name.as_deref(), &password).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_admin_create_parses_flags() {
        let cli = Cli::try_parse_from([
            "storehaus",
            "admin",
            "create",
            "-e",
            "ops@storehaus.test",
            "-p",
            "correct-horse-battery",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        match cli.command {
            Commands::Admin {
                action: AdminAction::Create { email, name, .. },
            } => {
                assert_eq!(email, "ops@storehaus.test");
                assert_eq!(name, None);
            }
            Commands::Migrate => panic!("expected admin create"),
        }
    }

    #[test]
    fn test_admin_create_requires_password() {
        let result = Cli::try_parse_from(["storehaus", "admin", "create", "-e", "a@b.co"]);
        assert!(result.is_err());
    }
}
