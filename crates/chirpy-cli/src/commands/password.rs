//! Password hashing commands.

use clap::{Args, Subcommand};

use chirpy_auth::CredentialHasher;
use chirpy_core::config::AppConfig;
use chirpy_core::error::AuthError;

use crate::output::{self, OutputFormat};

/// Arguments for password commands
#[derive(Debug, Args)]
pub struct PasswordArgs {
    /// Password subcommand
    #[command(subcommand)]
    pub command: PasswordCommand,
}

/// Password subcommands
#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    /// Hash a password with the configured Argon2id parameters
    Hash {
        /// Password (will prompt if not provided)
        password: Option<String>,
    },
    /// Check a password against a stored hash
    Verify {
        /// Password to check
        password: String,
        /// PHC hash string
        hash: String,
    },
}

/// Execute password commands
pub fn execute(
    args: &PasswordArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AuthError> {
    let hasher = CredentialHasher::new(&config.auth.password_hash)?;

    match &args.command {
        PasswordCommand::Hash { password } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AuthError::configuration(format!("Input error: {e}")))?,
            };
            let hash = hasher.hash(&password)?;
            output::print_value("hash", &hash, format);
        }
        PasswordCommand::Verify { password, hash } => {
            if hasher.verify(password, hash)? {
                output::print_success("Password matches");
            } else {
                return Err(AuthError::invalid_credentials());
            }
        }
    }

    Ok(())
}
