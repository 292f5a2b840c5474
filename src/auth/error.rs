// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

//! Authentication rejections.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Why a request was turned away at the authentication layer.
///
/// The variants matter for logging; the response they produce does not vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// A bearer token was presented and failed validation.
    #[error("bearer token rejected")]
    InvalidToken,
    /// A protected route was reached with no principal attached.
    #[error("no authenticated principal attached to the request")]
    MissingPrincipal,
    /// The subject could not be read back out of a token that had just
    /// validated. Unreachable while the signing secret is immutable.
    #[error("subject unavailable for a validated token")]
    SubjectUnavailable,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidToken
            | AuthError::MissingPrincipal
            | AuthError::SubjectUnavailable => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Status only, no body: the response must not reveal whether the
        // failure was a missing header, a bad signature, or an expired token.
        self.status_code().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn rejections_are_401_with_empty_body() {
        for error in [
            AuthError::InvalidToken,
            AuthError::MissingPrincipal,
            AuthError::SubjectUnavailable,
        ] {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert!(body.is_empty(), "{error} leaked a response body");
        }
    }
}
