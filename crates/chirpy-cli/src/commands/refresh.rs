//! Refresh-token commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use chirpy_core::config::{AppConfig, Platform};
use chirpy_auth::RefreshTokenStore;
use chirpy_core::error::AuthError;
use chirpy_entity::session::RefreshToken;

use crate::output::{self, OutputFormat};

/// Arguments for refresh-token commands
#[derive(Debug, Args)]
pub struct RefreshArgs {
    /// Refresh subcommand
    #[command(subcommand)]
    pub command: RefreshCommand,
}

/// Refresh-token subcommands
#[derive(Debug, Subcommand)]
pub enum RefreshCommand {
    /// Issue a refresh token for a user
    Issue {
        /// User ID
        user_id: String,
    },
    /// Resolve a refresh token to its owner, enforcing revocation and expiry
    Lookup {
        /// Refresh token
        token: String,
    },
    /// Show the stored record for a refresh token
    Inspect {
        /// Refresh token
        token: String,
    },
    /// Revoke a refresh token
    Revoke {
        /// Refresh token
        token: String,
    },
    /// Revoke every refresh token of a user
    RevokeUser {
        /// User ID
        user_id: String,
    },
    /// Revoke every refresh token (dev platform only)
    RevokeAll {
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Refresh-token display row
#[derive(Debug, Serialize, Tabled)]
struct RefreshTokenRow {
    /// Token
    token: String,
    /// Owner
    owner: String,
    /// Issued
    issued_at: String,
    /// Expires
    expires_at: String,
    /// Status
    status: String,
}

impl From<&RefreshToken> for RefreshTokenRow {
    fn from(token: &RefreshToken) -> Self {
        Self {
            token: token.token.clone(),
            owner: token.owner.to_string(),
            issued_at: token.issued_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            expires_at: token.expires_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            status: token.state().to_string(),
        }
    }
}

/// Owner display row
#[derive(Debug, Serialize, Tabled)]
struct OwnerRow {
    /// Owner
    owner: String,
}

/// Execute refresh-token commands
pub async fn execute(
    args: &RefreshArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AuthError> {
    if matches!(args.command, RefreshCommand::RevokeAll { .. }) && config.platform != Platform::Dev {
        return Err(AuthError::configuration(format!(
            "Revoking all refresh tokens is only allowed on the dev platform (current: {})",
            config.platform
        )));
    }

    let (db, store) = super::refresh_store(config).await?;
    let result = run(&args.command, &store, format).await;
    db.close().await;
    result
}

async fn run(
    command: &RefreshCommand,
    store: &RefreshTokenStore,
    format: OutputFormat,
) -> Result<(), AuthError> {
    match command {
        RefreshCommand::Issue { user_id } => {
            let owner = super::parse_user_id(user_id)?;
            let token = store.issue(owner).await?;
            output::print_item(&RefreshTokenRow::from(&token), format);
        }
        RefreshCommand::Lookup { token } => {
            let owner = store.lookup_owner(token).await?;
            output::print_item(
                &OwnerRow {
                    owner: owner.to_string(),
                },
                format,
            );
        }
        RefreshCommand::Inspect { token } => match store.inspect(token).await? {
            Some(record) => output::print_item(&RefreshTokenRow::from(&record), format),
            None => output::print_warning("No such refresh token"),
        },
        RefreshCommand::Revoke { token } => {
            store.revoke(token).await?;
            output::print_success("Refresh token revoked");
        }
        RefreshCommand::RevokeUser { user_id } => {
            let owner = super::parse_user_id(user_id)?;
            let count = store.revoke_all_for(owner).await?;
            output::print_success(&format!("Revoked {count} refresh tokens for {owner}"));
        }
        RefreshCommand::RevokeAll { force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt("Revoke ALL refresh tokens?")
                    .default(false)
                    .interact()
                    .map_err(|e| AuthError::configuration(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let count = store.revoke_all().await?;
            output::print_success(&format!("Revoked {count} refresh tokens"));
        }
    }

    Ok(())
}
