//! Auth Middleware
//!
//! Bearer token gate for protected routes.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{header, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::bearer::extract_bearer;
use platform::token::TokenCodec;

use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthGate {
    codec: Arc<TokenCodec>,
}

impl AuthGate {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }
}

/// Subject of the verified bearer token (the phone number)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSubject(pub String);

impl AuthenticatedSubject {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthenticatedSubject
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedSubject>()
            .cloned()
            .ok_or(AuthError::Unauthorized)
    }
}

/// Middleware that requires a valid bearer token
///
/// The rejection reason is logged at debug level only; every failure looks
/// the same to the client.
pub async fn require_bearer(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let verified = match extract_bearer(req.headers()) {
        Ok(token) => gate.codec.verify(token).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    let subject = match verified {
        Ok(subject) => subject,
        Err(reason) => {
            tracing::debug!(reason = %reason, "Bearer credential rejected");
            return Err((
                [(header::WWW_AUTHENTICATE, "Bearer")],
                AuthError::Unauthorized,
            )
                .into_response());
        }
    };

    req.extensions_mut().insert(AuthenticatedSubject(subject));

    Ok(next.run(req).await)
}
