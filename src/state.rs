// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{AccessPolicy, TokenValidator};
use crate::store::NoteStore;

/// Everything the auth middleware needs, assembled once at startup.
///
/// Validator and policy are immutable; the `Arc`s exist only so the state
/// clones cheaply per request.
#[derive(Clone)]
pub struct AuthConfig {
    pub validator: Arc<TokenValidator>,
    pub policy: Arc<AccessPolicy>,
}

impl AuthConfig {
    pub fn new(validator: TokenValidator, policy: AccessPolicy) -> Self {
        Self {
            validator: Arc::new(validator),
            policy: Arc::new(policy),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<NoteStore>>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(store: NoteStore, auth: AuthConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            auth,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared fixtures for tests that need a fully wired state.

    use chrono::Duration;

    use super::{AppState, AuthConfig};
    use crate::auth::validator::DEFAULT_CLOCK_SKEW_SECONDS;
    use crate::auth::{AccessPolicy, SigningSecret, TokenCodec, TokenValidator};
    use crate::store::NoteStore;

    /// Base64 of a 32-byte test secret. Tests mint their own tokens with it.
    pub(crate) const TEST_SECRET_B64: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

    pub(crate) fn test_validator() -> TokenValidator {
        let secret = SigningSecret::from_base64(TEST_SECRET_B64).unwrap();
        TokenValidator::new(
            TokenCodec::new(&secret),
            Duration::hours(1),
            Duration::seconds(DEFAULT_CLOCK_SKEW_SECONDS),
        )
    }

    /// State with the blanket policy: everything requires a principal.
    pub(crate) fn test_state() -> AppState {
        test_state_with_policy(AccessPolicy::protect_all())
    }

    pub(crate) fn test_state_with_policy(policy: AccessPolicy) -> AppState {
        AppState::new(
            NoteStore::new(),
            AuthConfig::new(test_validator(), policy),
        )
    }
}
