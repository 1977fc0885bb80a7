//! Access-token commands.

use chrono::Duration;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use chirpy_auth::{AccessTokenCodec, extract_bearer};
use chirpy_core::config::AppConfig;
use chirpy_core::error::AuthError;
use chirpy_core::types::UserId;

use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue an access token for a user
    Issue {
        /// User ID
        user_id: String,
        /// Lifetime in seconds (defaults to auth.access_token_ttl_seconds)
        #[arg(long)]
        ttl_seconds: Option<i64>,
    },
    /// Validate an access token and print its user
    Validate {
        /// Access token
        token: String,
    },
    /// Resolve the user behind an Authorization header value
    Authenticate {
        /// Header value, e.g. "Bearer eyJ..."
        header: String,
    },
}

/// Issued token display row
#[derive(Debug, Serialize, Tabled)]
struct AccessTokenRow {
    /// User ID
    user_id: String,
    /// Expires
    expires_at: String,
    /// Seconds
    expires_in: i64,
    /// Token
    token: String,
}

/// Validated principal display row
#[derive(Debug, Serialize, Tabled)]
struct PrincipalRow {
    /// User ID
    user_id: String,
}

impl From<UserId> for PrincipalRow {
    fn from(user_id: UserId) -> Self {
        Self {
            user_id: user_id.to_string(),
        }
    }
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AuthError> {
    let secret = config.auth.signing_secret()?;
    let codec = AccessTokenCodec::default();

    match &args.command {
        TokenCommand::Issue {
            user_id,
            ttl_seconds,
        } => {
            let user_id = super::parse_user_id(user_id)?;
            let ttl = match ttl_seconds {
                Some(seconds) => Duration::try_seconds(*seconds)
                    .ok_or_else(|| AuthError::configuration("ttl-seconds is out of range"))?,
                None => config.auth.access_token_ttl(),
            };

            let token = codec.issue(user_id, &secret, ttl)?;
            let row = AccessTokenRow {
                user_id: user_id.to_string(),
                expires_at: token.expires_at.to_rfc3339(),
                expires_in: token.expires_in(),
                token: token.token,
            };
            output::print_item(&row, format);
        }
        TokenCommand::Validate { token } => {
            let user_id = codec.validate(token, &secret)?;
            output::print_item(&PrincipalRow::from(user_id), format);
        }
        TokenCommand::Authenticate { header } => {
            let token = extract_bearer(header)?;
            let user_id = codec.validate(token, &secret)?;
            output::print_item(&PrincipalRow::from(user_id), format);
        }
    }

    Ok(())
}
