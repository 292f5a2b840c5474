// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

//! Compact JWS token encoding and decoding.
//!
//! The codec signs and verifies tokens with HMAC-SHA256 over the standard
//! three-segment compact encoding, so tokens issued by any other service
//! sharing the same secret validate here unchanged. Signature verification
//! happens inside the `jsonwebtoken` crate, which compares MACs in constant
//! time.
//!
//! The codec deliberately does **not** check expiry: a cryptographically
//! valid but expired token decodes fine. Time-based policy lives in
//! [`TokenValidator`](super::validator::TokenValidator) so callers can tell
//! "valid but stale" apart from "not even well-formed".

use base64ct::{Base64, Encoding};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::TokenClaims;

/// The process-wide signing secret, decoded from its base64 configuration
/// form once at startup and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

/// Why a configured secret was unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SecretError {
    #[error("signing secret is empty")]
    Empty,
    #[error("signing secret is not valid base64")]
    InvalidBase64,
}

impl SigningSecret {
    /// Decode a secret from its base64 (standard alphabet, padded) form.
    pub fn from_base64(encoded: &str) -> Result<Self, SecretError> {
        if encoded.is_empty() {
            return Err(SecretError::Empty);
        }
        let bytes = Base64::decode_vec(encoded).map_err(|_| SecretError::InvalidBase64)?;
        if bytes.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// Key material must never reach the logs, so Debug shows only the length.
impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningSecret({} bytes)", self.0.len())
    }
}

/// Why a presented token failed to decode.
///
/// Externally every variant collapses to the same 401; the distinction exists
/// for audit logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// No token was presented at all. Checked before any parsing.
    #[error("empty token")]
    Empty,
    /// The token does not split into three segments, or a segment does not
    /// parse, or its header names an algorithm other than HS256.
    #[error("malformed token")]
    Malformed,
    /// Structurally fine, but the MAC does not match the payload.
    #[error("signature mismatch")]
    BadSignature,
}

/// Signing failed. Cannot happen for well-formed claims; kept as a `Result`
/// so a serialization fault surfaces instead of panicking.
#[derive(Debug, thiserror::Error)]
#[error("failed to sign token: {0}")]
pub struct EncodeError(#[from] jsonwebtoken::errors::Error);

/// HS256 encoder/decoder bound to one [`SigningSecret`].
///
/// Pure computation, no I/O; safe to share across requests behind an `Arc`.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry policy belongs to the validator; the codec only answers
        // "was this signed with our secret".
        validation.validate_exp = false;
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            header: Header::new(Algorithm::HS256),
            validation,
        }
    }

    /// Serialize and sign `claims` into the compact three-segment form.
    ///
    /// Deterministic: identical claims produce an identical token.
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, EncodeError> {
        Ok(jsonwebtoken::encode(&self.header, claims, &self.encoding_key)?)
    }

    /// Verify the signature and return the embedded claims.
    ///
    /// Expired tokens decode successfully; see the module docs.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, DecodeError> {
        if token.is_empty() {
            return Err(DecodeError::Empty);
        }

        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| match err.kind() {
                ErrorKind::InvalidSignature => DecodeError::BadSignature,
                _ => DecodeError::Malformed,
            })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use chrono::{DateTime, Duration, Utc};

    const SECRET_B64: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

    fn codec() -> TokenCodec {
        TokenCodec::new(&SigningSecret::from_base64(SECRET_B64).unwrap())
    }

    fn sample_claims() -> TokenClaims {
        TokenClaims::new(
            "practitioner_7",
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            Duration::hours(1),
        )
    }

    #[test]
    fn secret_decodes_base64() {
        let secret = SigningSecret::from_base64(SECRET_B64).unwrap();
        assert_eq!(secret.as_bytes(), b"0123456789abcdef0123456789abcdef");
    }

    #[test]
    fn secret_rejects_empty_input() {
        assert_eq!(SigningSecret::from_base64(""), Err(SecretError::Empty));
    }

    #[test]
    fn secret_rejects_invalid_base64() {
        assert_eq!(
            SigningSecret::from_base64("not base64!"),
            Err(SecretError::InvalidBase64)
        );
        assert_eq!(SigningSecret::from_base64("===="), Err(SecretError::InvalidBase64));
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = SigningSecret::from_base64(SECRET_B64).unwrap();
        let debug = format!("{secret:?}");
        assert_eq!(debug, "SigningSecret(32 bytes)");
        assert!(!debug.contains("0123"));
    }

    #[test]
    fn round_trip_preserves_claims() {
        let codec = codec();
        let claims = sample_claims().with_claim("department", "cardiology");

        let token = codec.encode(&claims).unwrap();
        let decoded = codec.decode(&token).unwrap();

        assert_eq!(decoded, claims);
    }

    #[test]
    fn encoding_is_deterministic() {
        let codec = codec();
        let claims = sample_claims()
            .with_claim("department", "cardiology")
            .with_claim("shift", 2);

        assert_eq!(codec.encode(&claims).unwrap(), codec.encode(&claims).unwrap());
    }

    #[test]
    fn tokens_use_compact_jws_encoding() {
        let token = codec().encode(&sample_claims()).unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);

        let header_bytes = URL_SAFE_NO_PAD.decode(segments[0]).unwrap();
        let header: serde_json::Value = serde_json::from_slice(&header_bytes).unwrap();
        assert_eq!(header["alg"], "HS256");

        let payload_bytes = URL_SAFE_NO_PAD.decode(segments[1]).unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).unwrap();
        assert_eq!(payload["sub"], "practitioner_7");
    }

    #[test]
    fn empty_token_is_rejected_before_parsing() {
        assert_eq!(codec().decode(""), Err(DecodeError::Empty));
    }

    #[test]
    fn garbage_tokens_are_malformed() {
        let codec = codec();
        assert_eq!(codec.decode("garbage"), Err(DecodeError::Malformed));
        assert_eq!(codec.decode("only.two"), Err(DecodeError::Malformed));
        assert_eq!(codec.decode("a.b.c.d"), Err(DecodeError::Malformed));
    }

    #[test]
    fn tampered_signature_is_detected() {
        let codec = codec();
        let mut token = codec.encode(&sample_claims()).unwrap();

        // Flip the last signature character to another base64url character.
        let last = token.pop().unwrap();
        token.push(if last == 'A' { 'B' } else { 'A' });

        assert_eq!(codec.decode(&token), Err(DecodeError::BadSignature));
    }

    #[test]
    fn tampered_payload_is_detected() {
        let codec = codec();
        let token = codec.encode(&sample_claims()).unwrap();
        let segments: Vec<&str> = token.split('.').collect();

        // Rewrite the subject inside the payload without re-signing.
        let payload_bytes = URL_SAFE_NO_PAD.decode(segments[1]).unwrap();
        let mut payload: serde_json::Value = serde_json::from_slice(&payload_bytes).unwrap();
        payload["sub"] = serde_json::json!("someone_else");
        let forged_payload = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());

        let forged = format!("{}.{}.{}", segments[0], forged_payload, segments[2]);
        assert_eq!(codec.decode(&forged), Err(DecodeError::BadSignature));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = TokenCodec::new(
            &SigningSecret::from_base64("c29tZS1vdGhlci1zaWduaW5nLXNlY3JldC12YWx1ZQ==").unwrap(),
        );
        let token = other.encode(&sample_claims()).unwrap();

        assert_eq!(codec().decode(&token), Err(DecodeError::BadSignature));
    }

    #[test]
    fn tokens_signed_with_another_algorithm_are_malformed() {
        let secret = SigningSecret::from_base64(SECRET_B64).unwrap();
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS384),
            &sample_claims(),
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(codec().decode(&token), Err(DecodeError::Malformed));
    }

    #[test]
    fn unsigned_token_with_alg_none_is_rejected() {
        // Classic downgrade attempt: alg "none" with an empty signature.
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            br#"{"sub":"practitioner_7","iat":1700000000,"exp":9999999999}"#,
        );
        let token = format!("{header}.{payload}.");

        assert_eq!(codec().decode(&token), Err(DecodeError::Malformed));
    }

    #[test]
    fn expired_tokens_still_decode() {
        let codec = codec();
        let expired = TokenClaims::new(
            "practitioner_7",
            Utc::now() - Duration::hours(2),
            Duration::hours(1),
        );

        let token = codec.encode(&expired).unwrap();
        let decoded = codec.decode(&token).unwrap();
        assert_eq!(decoded.sub, "practitioner_7");
    }
}
