// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

//! JWT claims and the per-request principal.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Payload carried inside a signed token.
///
/// `sub`, `iat` and `exp` are the registered claims every token must carry;
/// anything else an issuer adds ends up in `extra`, flattened into the JSON
/// payload. `extra` is a `BTreeMap` so two tokens minted with identical
/// timestamps and claims encode to identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the principal identifier this token authenticates.
    pub sub: String,

    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,

    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,

    /// Any additional claims the issuer included.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl TokenClaims {
    /// Create claims for `subject` issued at `issued_at`, expiring after
    /// `lifetime`. Lifetime resolution is whole seconds, like the `exp` and
    /// `iat` claims themselves.
    pub fn new(subject: impl Into<String>, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let issued = issued_at.timestamp();
        Self {
            sub: subject.into(),
            iat: issued,
            exp: issued + lifetime.num_seconds(),
            extra: BTreeMap::new(),
        }
    }

    /// Attach an additional claim.
    pub fn with_claim(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// Identity attached to a single request after its bearer token validated.
///
/// Lives in the request's extensions for the duration of that request and is
/// dropped with it; nothing about the caller is retained between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    /// Principal identifier, taken from the token's `sub` claim.
    pub subject: String,
}

impl AuthenticatedPrincipal {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_derives_expiry_from_lifetime() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = TokenClaims::new("practitioner_7", issued_at, Duration::minutes(30));

        assert_eq!(claims.sub, "practitioner_7");
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_001_800);
        assert!(claims.extra.is_empty());
    }

    #[test]
    fn expiry_is_after_issuance() {
        let claims = TokenClaims::new("practitioner_7", Utc::now(), Duration::seconds(1));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn with_claim_collects_extra_claims() {
        let claims = TokenClaims::new("practitioner_7", Utc::now(), Duration::hours(1))
            .with_claim("department", "cardiology")
            .with_claim("shift", 2);

        assert_eq!(
            claims.extra.get("department"),
            Some(&serde_json::json!("cardiology"))
        );
        assert_eq!(claims.extra.get("shift"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn extra_claims_flatten_into_payload() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = TokenClaims::new("practitioner_7", issued_at, Duration::hours(1))
            .with_claim("department", "cardiology");

        let payload = serde_json::to_value(&claims).unwrap();
        assert_eq!(payload["sub"], "practitioner_7");
        assert_eq!(payload["department"], "cardiology");
        // Flattened, not nested under an "extra" key.
        assert!(payload.get("extra").is_none());
    }

    #[test]
    fn payload_round_trips_through_json() {
        let claims = TokenClaims::new(
            "practitioner_7",
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            Duration::hours(1),
        )
        .with_claim("department", "cardiology");

        let json = serde_json::to_string(&claims).unwrap();
        let decoded: TokenClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, claims);
    }
}
