//! Session token entities.

pub mod refresh_token;
pub mod state;
pub mod token;

pub use refresh_token::{RefreshToken, RefreshTokenRow};
pub use state::RefreshTokenState;
pub use token::AccessToken;
