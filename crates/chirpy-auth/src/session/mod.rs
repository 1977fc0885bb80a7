//! Login, refresh and logout orchestration.

pub mod lookup;
pub mod manager;

pub use lookup::CredentialLookup;
pub use manager::{LoginResult, SessionService};
