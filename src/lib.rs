// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

//! Abernathy Clinic - Patient History Service
//!
//! This crate stores and serves free-text medical history notes for
//! patients. All endpoints are guarded by stateless JWT bearer
//! authentication; tokens are verified locally against a shared secret,
//! so no session state or auth provider round-trip is involved.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer token verification and access policy
//! - `store` - In-memory note storage
//! - `config` - Environment-driven runtime configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
