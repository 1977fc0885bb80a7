//! # chirpy-auth
//!
//! Authentication and session tokens for Chirpy.
//!
//! ## Modules
//!
//! - `password` — Argon2id credential hashing and verification
//! - `bearer` — `Authorization: Bearer <token>` extraction
//! - `jwt` — HS256 access-token issuance and validation
//! - `refresh` — opaque refresh tokens with server-side revocation
//! - `session` — login, refresh, logout and per-request authentication

pub mod bearer;
mod entropy;
pub mod jwt;
pub mod password;
pub mod refresh;
pub mod session;

pub use bearer::{BEARER_SCHEME, extract_bearer, extract_bearer_from_headers};
pub use jwt::{ACCESS_TOKEN_ISSUER, AccessTokenCodec, Claims, DEFAULT_ACCESS_TOKEN_TTL, TokenKind};
pub use password::CredentialHasher;
#[cfg(feature = "postgres")]
pub use refresh::PgRefreshTokenBackend;
pub use refresh::{MemoryRefreshTokenBackend, RefreshTokenBackend, RefreshTokenStore};
pub use session::{CredentialLookup, LoginResult, SessionService};
