//! Core type definitions used across the Chirpy workspace.

pub mod id;
pub mod secret;

pub use id::UserId;
pub use secret::SigningSecret;
