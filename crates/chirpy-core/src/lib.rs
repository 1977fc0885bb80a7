//! # chirpy-core
//!
//! Core crate for Chirpy authentication. Contains the error taxonomy,
//! configuration schemas, the principal identifier, the signing secret
//! wrapper, and the clock and metrics traits.
//!
//! This crate has **no** internal dependencies on other Chirpy crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AuthError, ErrorKind};
pub use result::AuthResult;
pub use types::{SigningSecret, UserId};
