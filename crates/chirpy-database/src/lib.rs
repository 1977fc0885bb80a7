//! # chirpy-database
//!
//! PostgreSQL connection management, migrations, and the refresh-token
//! repository for Chirpy auth.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::RefreshTokenRepository;
