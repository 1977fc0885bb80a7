//! Repository implementations for Chirpy auth entities.

pub mod refresh_token;

pub use refresh_token::RefreshTokenRepository;
