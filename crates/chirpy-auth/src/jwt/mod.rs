//! Access-token issuance and validation.
//!
//! Access tokens are compact HS256-signed JWTs whose claims carry the issuer
//! tag, the principal UUID and second-resolution issue and expiry times.
//! Expiry is evaluated against the codec's [`Clock`] rather than the library's
//! own wall-clock check, so tests can drive time explicitly.

pub mod claims;
pub mod decoder;
pub mod encoder;

use std::sync::Arc;

use chirpy_core::traits::{Clock, SystemClock};

pub use claims::{ACCESS_TOKEN_ISSUER, Claims, TokenKind};
pub use encoder::DEFAULT_ACCESS_TOKEN_TTL;

/// Issues and validates access tokens.
///
/// The codec is stateless apart from its clock. The signing secret is passed
/// to every call so the same codec can serve rotated secrets.
#[derive(Debug, Clone)]
pub struct AccessTokenCodec {
    clock: Arc<dyn Clock>,
}

impl AccessTokenCodec {
    /// Creates a codec reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// The clock used for issue and expiry checks.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}

impl Default for AccessTokenCodec {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    use chirpy_core::error::ErrorKind;
    use chirpy_core::traits::ManualClock;
    use chirpy_core::types::{SigningSecret, UserId};

    use super::*;

    fn secret() -> SigningSecret {
        SigningSecret::from("a-long-enough-test-secret")
    }

    fn codec_with_clock() -> (AccessTokenCodec, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::starting_now());
        (AccessTokenCodec::new(clock.clone()), clock)
    }

    fn sign(value: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &value,
            &EncodingKey::from_secret(secret().as_bytes()),
        )
        .expect("encode")
    }

    #[test]
    fn test_issue_then_validate() {
        let (codec, _) = codec_with_clock();
        let user = UserId::new();
        let token = codec
            .issue(user, &secret(), Duration::hours(1))
            .expect("issue");
        assert_eq!(token.expires_in(), 3600);
        assert_eq!(codec.validate(token.as_str(), &secret()).expect("validate"), user);
    }

    #[test]
    fn test_token_valid_until_expiry_second() {
        let (codec, clock) = codec_with_clock();
        let user = UserId::new();
        let token = codec
            .issue(user, &secret(), Duration::seconds(30))
            .expect("issue");

        clock.advance(Duration::seconds(30));
        assert_eq!(codec.validate(token.as_str(), &secret()).expect("validate"), user);

        clock.advance(Duration::seconds(1));
        let err = codec.validate(token.as_str(), &secret()).expect_err("expired");
        assert_eq!(err.kind, ErrorKind::TokenExpired);
    }

    #[test]
    fn test_non_positive_ttl_defaults_to_one_hour() {
        let (codec, _) = codec_with_clock();
        let zero = codec
            .issue(UserId::new(), &secret(), Duration::zero())
            .expect("issue");
        let negative = codec
            .issue(UserId::new(), &secret(), Duration::seconds(-5))
            .expect("issue");
        assert_eq!(zero.expires_in(), 3600);
        assert_eq!(negative.expires_in(), 3600);
    }

    #[test]
    fn test_unrepresentable_ttl_is_configuration_error() {
        let (codec, _) = codec_with_clock();
        let err = codec
            .issue(UserId::new(), &secret(), Duration::days(100_000_000))
            .expect_err("ttl past the date range");
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let (codec, _) = codec_with_clock();
        let token = codec
            .issue(UserId::new(), &secret(), Duration::hours(1))
            .expect("issue");

        let (head, signature) = token.as_str().rsplit_once('.').expect("three segments");
        let replacement = if signature.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{head}.{replacement}{}", &signature[1..]);

        let err = codec.validate(&tampered, &secret()).expect_err("tampered");
        assert_eq!(err.kind, ErrorKind::InvalidSignature);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let (codec, _) = codec_with_clock();
        let token = codec
            .issue(UserId::new(), &secret(), Duration::hours(1))
            .expect("issue");
        let err = codec
            .validate(token.as_str(), &SigningSecret::from("another-secret"))
            .expect_err("wrong secret");
        assert_eq!(err.kind, ErrorKind::InvalidSignature);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let (codec, _) = codec_with_clock();
        for garbage in ["", "abc", "a.b.c", "not.a.jwt.at.all"] {
            let err = codec.validate(garbage, &secret()).expect_err("garbage");
            assert_eq!(err.kind, ErrorKind::InvalidSignature, "input {garbage:?}");
        }
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let (codec, clock) = codec_with_clock();
        let now = clock.now().timestamp();
        let token = sign(json!({
            "iss": "someone-else",
            "sub": UserId::new().to_string(),
            "iat": now,
            "exp": now + 60,
        }));
        let err = codec.validate(&token, &secret()).expect_err("foreign issuer");
        assert_eq!(err.kind, ErrorKind::IssuerMismatch);
    }

    #[test]
    fn test_missing_issuer_rejected() {
        let (codec, clock) = codec_with_clock();
        let now = clock.now().timestamp();
        let token = sign(json!({
            "sub": UserId::new().to_string(),
            "iat": now,
            "exp": now + 60,
        }));
        let err = codec.validate(&token, &secret()).expect_err("no issuer");
        assert_eq!(err.kind, ErrorKind::IssuerMismatch);
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let (codec, clock) = codec_with_clock();
        let now = clock.now().timestamp();
        let token = sign(json!({
            "iss": ACCESS_TOKEN_ISSUER,
            "sub": "user-42",
            "iat": now,
            "exp": now + 60,
        }));
        let err = codec.validate(&token, &secret()).expect_err("bad subject");
        assert_eq!(err.kind, ErrorKind::SubjectMalformed);
    }

    #[test]
    fn test_missing_or_non_string_subject_rejected() {
        let (codec, clock) = codec_with_clock();
        let now = clock.now().timestamp();
        for sub in [None, Some(json!(42)), Some(json!({ "id": 1 })), Some(json!(null))] {
            let mut claims = json!({
                "iss": ACCESS_TOKEN_ISSUER,
                "iat": now,
                "exp": now + 60,
            });
            if let Some(sub) = sub.clone() {
                claims["sub"] = sub;
            }
            let err = codec.validate(&sign(claims), &secret()).expect_err("bad subject");
            assert_eq!(err.kind, ErrorKind::SubjectMalformed, "sub {sub:?}");
        }
    }

    #[test]
    fn test_non_string_issuer_rejected() {
        let (codec, clock) = codec_with_clock();
        let now = clock.now().timestamp();
        for iss in [json!(7), json!(["chirpy"]), json!({ "name": "chirpy" })] {
            let token = sign(json!({
                "iss": iss,
                "sub": UserId::new().to_string(),
                "iat": now,
                "exp": now + 60,
            }));
            let err = codec.validate(&token, &secret()).expect_err("bad issuer");
            assert_eq!(err.kind, ErrorKind::IssuerMismatch, "iss {iss}");
        }
    }

    #[test]
    fn test_missing_expiry_is_expired() {
        let (codec, clock) = codec_with_clock();
        let now = clock.now().timestamp();
        let token = sign(json!({
            "iss": ACCESS_TOKEN_ISSUER,
            "sub": UserId::new().to_string(),
            "iat": now,
        }));
        let err = codec.validate(&token, &secret()).expect_err("no expiry");
        assert_eq!(err.kind, ErrorKind::TokenExpired);
    }

    #[test]
    fn test_non_object_payload_is_invalid() {
        let (codec, _) = codec_with_clock();
        let err = codec
            .validate(&sign(json!("claims")), &secret())
            .expect_err("string payload");
        assert_eq!(err.kind, ErrorKind::InvalidSignature);
    }

    #[test]
    fn test_expiry_checked_before_issuer() {
        let (codec, clock) = codec_with_clock();
        let now = clock.now().timestamp();
        let token = sign(json!({
            "iss": "someone-else",
            "sub": "user-42",
            "iat": now - 120,
            "exp": now - 60,
        }));
        let err = codec.validate(&token, &secret()).expect_err("expired");
        assert_eq!(err.kind, ErrorKind::TokenExpired);
    }

    #[test]
    fn test_empty_secret_is_configuration_error() {
        let (codec, _) = codec_with_clock();
        let empty = SigningSecret::from("");
        let err = codec
            .issue(UserId::new(), &empty, Duration::hours(1))
            .expect_err("empty secret");
        assert_eq!(err.kind, ErrorKind::Configuration);
        let err = codec.validate("a.b.c", &empty).expect_err("empty secret");
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
