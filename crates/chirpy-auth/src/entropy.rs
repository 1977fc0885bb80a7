//! Fallible access to the operating system's random source.

use rand::TryRng;
use rand::rngs::SysRng;

use chirpy_core::error::{AuthError, ErrorKind};

/// Fills `buf` from the OS random source.
///
/// An unavailable source is a `HashingFailure`, never a panic.
pub(crate) fn fill(buf: &mut [u8]) -> Result<(), AuthError> {
    SysRng.try_fill_bytes(buf).map_err(|e| {
        AuthError::with_source(ErrorKind::HashingFailure, "OS random source failed", e)
    })
}

/// Draws `N` random bytes from the OS random source.
pub(crate) fn bytes<const N: usize>() -> Result<[u8; N], AuthError> {
    let mut buf = [0u8; N];
    fill(&mut buf)?;
    Ok(buf)
}
