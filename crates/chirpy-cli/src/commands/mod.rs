//! CLI command definitions and dispatch.

pub mod migrate;
pub mod password;
pub mod refresh;
pub mod token;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use chirpy_auth::{PgRefreshTokenBackend, RefreshTokenStore};
use chirpy_core::config::AppConfig;
use chirpy_core::error::{AuthError, ErrorKind};
use chirpy_core::traits::SystemClock;
use chirpy_core::types::UserId;
use chirpy_database::DatabasePool;

use crate::output::OutputFormat;

/// Chirpy credential and session-token administration
#[derive(Debug, Parser)]
#[command(name = "chirpy-auth", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Password hashing
    Password(password::PasswordArgs),
    /// Access tokens
    Token(token::TokenArgs),
    /// Refresh tokens
    Refresh(refresh::RefreshArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AuthError> {
        match &self.command {
            Commands::Password(args) => password::execute(args, config, self.format),
            Commands::Token(args) => token::execute(args, config, self.format),
            Commands::Refresh(args) => refresh::execute(args, config, self.format).await,
            Commands::Migrate(args) => migrate::execute(args, config).await,
        }
    }
}

/// Helper: connect to the refresh-token database
pub async fn connect_db(config: &AppConfig) -> Result<DatabasePool, AuthError> {
    DatabasePool::connect(&config.database).await
}

/// Helper: refresh-token store backed by PostgreSQL, with the pool it runs on.
///
/// The caller closes the pool once the store is no longer needed.
pub async fn refresh_store(
    config: &AppConfig,
) -> Result<(DatabasePool, RefreshTokenStore), AuthError> {
    let db = connect_db(config).await?;
    let backend = PgRefreshTokenBackend::new(db.refresh_tokens());
    let store = RefreshTokenStore::new(Arc::new(backend), Arc::new(SystemClock));
    Ok((db, store))
}

/// Helper: parse a user id argument
pub fn parse_user_id(raw: &str) -> Result<UserId, AuthError> {
    raw.parse().map_err(|e| {
        AuthError::with_source(
            ErrorKind::SubjectMalformed,
            format!("Invalid user id '{raw}'"),
            e,
        )
    })
}
