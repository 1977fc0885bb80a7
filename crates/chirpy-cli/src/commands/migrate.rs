//! Database migration commands.

use clap::{Args, Subcommand};

use chirpy_core::config::AppConfig;
use chirpy_core::error::AuthError;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Create or update the refresh-token table
    Run,
    /// Check that the database is reachable
    Check,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AuthError> {
    let db = super::connect_db(config).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            chirpy_database::migration::run_migrations(db.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Check => {
            if db.health_check().await? {
                output::print_success("Database is reachable.");
            } else {
                output::print_warning("Database answered unexpectedly.");
            }
        }
    }

    db.close().await;
    Ok(())
}
