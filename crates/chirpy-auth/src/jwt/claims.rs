//! Access-token claims and the token-kind tag carried in the issuer field.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Issuer string stamped on every access token minted by this system.
pub const ACCESS_TOKEN_ISSUER: &str = "chirpy";

/// Kind of token, carried in the `iss` claim.
///
/// Any issuer other than the string [`ACCESS_TOKEN_ISSUER`], including a
/// missing or non-string one, becomes [`TokenKind::Unrecognized`], so a token
/// minted by a different system or for a different purpose can never pass as
/// an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TokenKind {
    /// Short-lived access token minted by this system.
    #[serde(rename = "chirpy")]
    Access,
    /// Anything else.
    #[default]
    #[serde(other)]
    Unrecognized,
}

/// Claims payload of an access token.
///
/// Decoding never fails on a claim's type once the signature has verified:
/// a bad `iss` is `Unrecognized`, a bad `sub` is empty, and a bad `iat` or
/// `exp` is the epoch. The codec then rejects the token with the error that
/// names the offending claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer, doubling as the token-kind tag.
    #[serde(default, deserialize_with = "token_kind")]
    pub iss: TokenKind,
    /// Subject: the principal's UUID string.
    #[serde(default, deserialize_with = "subject")]
    pub sub: String,
    /// Issued-at (seconds since epoch).
    #[serde(default, deserialize_with = "numeric_date")]
    pub iat: i64,
    /// Expiration (seconds since epoch).
    #[serde(default, deserialize_with = "numeric_date")]
    pub exp: i64,
}

fn token_kind<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TokenKind, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(issuer) if issuer == ACCESS_TOKEN_ISSUER => TokenKind::Access,
        _ => TokenKind::Unrecognized,
    })
}

fn subject<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(subject) => subject,
        _ => String::new(),
    })
}

fn numeric_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .or_else(|| value.as_f64().map(|secs| secs as i64))
        .unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_kind_serializes_to_issuer_constant() {
        let json = serde_json::to_string(&TokenKind::Access).expect("serialize");
        assert_eq!(json, format!("\"{ACCESS_TOKEN_ISSUER}\""));
    }

    #[test]
    fn test_foreign_issuer_is_unrecognized() {
        let claims: Claims = serde_json::from_str(
            r#"{"iss":"someone-else","sub":"x","iat":0,"exp":1}"#,
        )
        .expect("deserialize");
        assert_eq!(claims.iss, TokenKind::Unrecognized);
    }

    #[test]
    fn test_missing_issuer_is_unrecognized() {
        let claims: Claims =
            serde_json::from_str(r#"{"sub":"x","iat":0,"exp":1}"#).expect("deserialize");
        assert_eq!(claims.iss, TokenKind::Unrecognized);
    }

    #[test]
    fn test_mistyped_claims_still_decode() {
        let claims: Claims = serde_json::from_str(
            r#"{"iss":42,"sub":{"id":1},"iat":"yesterday","exp":1700000000.9}"#,
        )
        .expect("deserialize");
        assert_eq!(claims.iss, TokenKind::Unrecognized);
        assert_eq!(claims.sub, "");
        assert_eq!(claims.iat, 0);
        assert_eq!(claims.exp, 1_700_000_000);
    }

    #[test]
    fn test_missing_subject_and_expiry_default() {
        let claims: Claims = serde_json::from_str(r#"{"iss":"chirpy"}"#).expect("deserialize");
        assert_eq!(claims.iss, TokenKind::Access);
        assert!(claims.sub.is_empty());
        assert_eq!(claims.exp, 0);
    }
}
