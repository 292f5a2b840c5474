// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

//! # Authentication Module
//!
//! Stateless JWT bearer authentication for the patient history API.
//!
//! ## Auth Flow
//!
//! 1. A caller obtains an HS256 token from an issuer sharing this service's
//!    signing secret (this service never runs a login flow itself).
//! 2. The caller sends `Authorization: Bearer <token>` on every request.
//! 3. The gate middleware validates signature and expiry, then attaches the
//!    token's subject to the request; the enforcer middleware rejects any
//!    non-exempt request that ends up without one.
//!
//! ## Security
//!
//! - Every route requires authentication unless explicitly exempted by the
//!   configured [`AccessPolicy`]
//! - The signing secret is decoded once at startup and never logged
//! - Signature comparison is constant-time (inside `jsonwebtoken`)
//! - Rejections are a bodyless 401 regardless of the failure class; the
//!   class is kept for logs only
//! - Clock skew tolerance for the expiry check defaults to 60 seconds
//!
//! No component here holds mutable state: any process instance can validate
//! any token signed with the shared secret, with no session affinity.

pub mod claims;
pub mod codec;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod policy;
pub mod validator;

pub use claims::{AuthenticatedPrincipal, TokenClaims};
pub use codec::{DecodeError, EncodeError, SecretError, SigningSecret, TokenCodec};
pub use error::AuthError;
pub use extractor::{OptionalPrincipal, Principal};
pub use policy::AccessPolicy;
pub use validator::TokenValidator;
