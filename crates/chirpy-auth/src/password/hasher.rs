//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString,
    },
};

use chirpy_core::config::PasswordHashConfig;
use chirpy_core::error::{AuthError, ErrorKind};

use crate::entropy;

/// Salt bytes drawn per hash (128 bits).
const SALT_BYTES: usize = 16;

/// Fixed salt for [`CredentialHasher::decoy_hash`].
const DECOY_SALT: &str = "Y2hpcnB5LWRlY295LXNhbHQ";

/// Computes and checks memory-hard password hashes.
///
/// New hashes use Argon2id v0x13 with the configured cost parameters and a
/// fresh random salt. The output is a PHC string that embeds algorithm,
/// version, parameters and salt, so verification always uses the parameters
/// the hash was created with.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Creates a hasher with explicit cost parameters.
    pub fn new(config: &PasswordHashConfig) -> Result<Self, AuthError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AuthError::hashing(format!("Invalid Argon2 parameters: {e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext secret with a random salt.
    pub fn hash(&self, secret: &str) -> Result<String, AuthError> {
        let salt = SaltString::encode_b64(&entropy::bytes::<SALT_BYTES>()?)
            .map_err(|e| AuthError::hashing(format!("Salt encoding failed: {e}")))?;

        let hash = self
            .argon2()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AuthError::hashing(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Hash that no password is expected to match, built with this hasher's
    /// parameters so verifying against it costs the same as a real check.
    pub fn decoy_hash(&self) -> Result<String, AuthError> {
        let salt = SaltString::from_b64(DECOY_SALT)
            .map_err(|e| AuthError::hashing(format!("Invalid decoy salt: {e}")))?;
        let hash = self
            .argon2()
            .hash_password(DECOY_SALT.as_bytes(), &salt)
            .map_err(|e| AuthError::hashing(format!("Password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verifies a plaintext secret against a stored hash in constant time.
    ///
    /// Returns `Ok(false)` on mismatch. Fails only if `hash` cannot be parsed
    /// or names parameters this build cannot evaluate.
    pub fn verify(&self, secret: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            AuthError::with_source(
                ErrorKind::HashingFailure,
                "Stored password hash is not a valid PHC string",
                e,
            )
        })?;

        match self.argon2().verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::with_source(
                ErrorKind::HashingFailure,
                "Password verification failed",
                e,
            )),
        }
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            params: Params::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Small parameters so debug-mode tests stay fast.
    fn fast_hasher() -> CredentialHasher {
        CredentialHasher::new(&PasswordHashConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("valid params")
    }

    #[test]
    fn test_hash_then_verify() {
        let hasher = fast_hasher();
        let hash = hasher.hash("correct horse battery staple").expect("hash");
        assert!(hasher.verify("correct horse battery staple", &hash).expect("verify"));
    }

    #[test]
    fn test_wrong_password_is_false_not_error() {
        let hasher = fast_hasher();
        let hash = hasher.hash("pw").expect("hash");
        assert!(!hasher.verify("pw2", &hash).expect("verify"));
        assert!(!hasher.verify("", &hash).expect("verify"));
    }

    #[test]
    fn test_salt_is_fresh_each_time() {
        let hasher = fast_hasher();
        let first = hasher.hash("same secret").expect("hash");
        let second = hasher.hash("same secret").expect("hash");
        assert_ne!(first, second);
        assert!(hasher.verify("same secret", &first).expect("verify"));
        assert!(hasher.verify("same secret", &second).expect("verify"));
    }

    #[test]
    fn test_hash_embeds_parameters() {
        let hash = fast_hasher().hash("pw").expect("hash");
        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(hash.contains("m=1024,t=1,p=1"));
    }

    #[test]
    fn test_salt_carries_sixteen_bytes() {
        let hash = fast_hasher().hash("pw").expect("hash");
        let parsed = PasswordHash::new(&hash).expect("phc");
        let salt = parsed.salt.expect("salt present");
        let mut buf = [0u8; 64];
        assert_eq!(salt.decode_b64(&mut buf).expect("b64").len(), SALT_BYTES);
    }

    #[test]
    fn test_verify_uses_parameters_from_hash() {
        let old = fast_hasher().hash("pw").expect("hash");
        let upgraded = CredentialHasher::new(&PasswordHashConfig {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 1,
        })
        .expect("valid params");
        assert!(upgraded.verify("pw", &old).expect("verify"));
    }

    #[test]
    fn test_decoy_hash_is_stable_and_uses_parameters() {
        let hasher = fast_hasher();
        let decoy = hasher.decoy_hash().expect("decoy");
        assert_eq!(decoy, hasher.decoy_hash().expect("decoy"));
        assert!(decoy.contains("m=1024,t=1,p=1"));
        assert!(!hasher.verify("pw", &decoy).expect("verify"));
    }

    #[test]
    fn test_unparsable_hash_is_hashing_failure() {
        let err = fast_hasher()
            .verify("pw", "definitely-not-a-phc-string")
            .expect_err("must fail");
        assert_eq!(err.kind, ErrorKind::HashingFailure);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let err = CredentialHasher::new(&PasswordHashConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 0,
        })
        .expect_err("must fail");
        assert_eq!(err.kind, ErrorKind::HashingFailure);
    }
}
