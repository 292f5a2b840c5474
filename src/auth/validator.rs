// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

//! Token validity policy on top of the codec.
//!
//! The validator owns everything time-related: the expiry check with its
//! clock-skew allowance, and issuance (which shares the same lifetime
//! configuration). Its verdict is a bare bool; the reason a token was
//! rejected goes to the log and nowhere else.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};

use super::claims::TokenClaims;
use super::codec::{DecodeError, EncodeError, TokenCodec};

/// Default grace period (seconds) for clock drift between token issuer and
/// validator.
pub const DEFAULT_CLOCK_SKEW_SECONDS: i64 = 60;

/// Validates presented tokens and issues new ones.
///
/// Immutable after construction; share it behind an `Arc`. Validation is pure
/// CPU work (one MAC plus a timestamp compare), so concurrent callers need no
/// coordination.
pub struct TokenValidator {
    codec: TokenCodec,
    token_lifetime: Duration,
    clock_skew: Duration,
}

impl TokenValidator {
    pub fn new(codec: TokenCodec, token_lifetime: Duration, clock_skew: Duration) -> Self {
        Self {
            codec,
            token_lifetime,
            clock_skew,
        }
    }

    /// One-shot verdict for a presented token.
    ///
    /// `false` for anything that is not a well-signed token still inside its
    /// expiry window: empty input, malformed structure, signature mismatch,
    /// or expiry beyond the skew allowance. The failure class is logged here
    /// and then discarded; callers branch on the bool alone.
    pub fn is_valid(&self, token: &str) -> bool {
        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(reason) => {
                tracing::debug!(%reason, "Rejected bearer token");
                return false;
            }
        };

        // A token expiring up to `clock_skew` ago is still accepted, so minor
        // drift between issuer and validator clocks does not lock callers out.
        let deadline = claims.exp + self.clock_skew.num_seconds();
        if Utc::now().timestamp() <= deadline {
            true
        } else {
            tracing::debug!(subject = %claims.sub, "Rejected expired bearer token");
            false
        }
    }

    /// Pull the subject out of a token.
    ///
    /// Only call this after [`is_valid`](Self::is_valid) returned `true`, or
    /// handle the error explicitly; an invalid token here is a caller bug and
    /// must not be silently swallowed.
    pub fn extract_subject(&self, token: &str) -> Result<String, DecodeError> {
        Ok(self.codec.decode(token)?.sub)
    }

    /// Issue a token for `subject` using the configured lifetime.
    pub fn issue(&self, subject: &str) -> Result<String, EncodeError> {
        self.codec
            .encode(&TokenClaims::new(subject, Utc::now(), self.token_lifetime))
    }

    /// Issue a token carrying additional claims alongside the registered set.
    pub fn issue_with_claims(
        &self,
        subject: &str,
        extra: BTreeMap<String, serde_json::Value>,
    ) -> Result<String, EncodeError> {
        let mut claims = TokenClaims::new(subject, Utc::now(), self.token_lifetime);
        claims.extra = extra;
        self.codec.encode(&claims)
    }
}
