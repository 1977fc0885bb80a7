//! User-side entities consumed by authentication.

pub mod credential;

pub use credential::StoredCredential;
