//! Refresh-token issuance, lookup and revocation.

pub mod backend;
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod store;

pub use backend::RefreshTokenBackend;
pub use memory::MemoryRefreshTokenBackend;
#[cfg(feature = "postgres")]
pub use postgres::PgRefreshTokenBackend;
pub use store::{REFRESH_TOKEN_BYTES, REFRESH_TOKEN_TTL_DAYS, RefreshTokenStore, generate_token};
