//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::{EmailVerificationRepository, IdentityRepository};
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router for any repository implementation
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: IdentityRepository + EmailVerificationRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/auth", post(handlers::request_login::<R>))
        .route("/auth/verify", post(handlers::verify_login::<R>))
        .route("/email/send", post(handlers::send_email_verification::<R>))
        .route("/verify/{token}", get(handlers::verify_email::<R>))
        .with_state(state)
}
