// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

//! Process-wide access policy.
//!
//! The rule is blanket: every request must carry an authenticated principal.
//! The only way out is the explicit exemption list built from configuration
//! at startup, and exemption is decided on the raw request path before any
//! token processing happens.

/// Which paths are allowed through without a principal.
///
/// Built once at startup, immutable afterwards. The default exempts nothing,
/// not even the health probe.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    exempt_prefixes: Vec<String>,
}

impl AccessPolicy {
    /// The blanket policy: no exemptions at all.
    pub fn protect_all() -> Self {
        Self::default()
    }

    /// Policy with the given exempt path prefixes.
    ///
    /// Empty entries are discarded: `"".starts_with` matches every path, and
    /// a policy that exempts everything is a misconfiguration, not a policy.
    pub fn with_exempt_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exempt_prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|prefix| !prefix.is_empty())
                .collect(),
        }
    }

    /// Whether `path` may proceed without an authenticated principal.
    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix))
    }

    pub fn exempt_prefixes(&self) -> &[String] {
        &self.exempt_prefixes
    }
}
