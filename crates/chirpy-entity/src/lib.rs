//! # chirpy-entity
//!
//! Entity models for Chirpy authentication: the persisted refresh token and
//! its storage row, the access-token value handed to clients, and the stored
//! credential resolved from the external user record.

pub mod session;
pub mod user;

pub use session::{AccessToken, RefreshToken, RefreshTokenRow, RefreshTokenState};
pub use user::StoredCredential;
