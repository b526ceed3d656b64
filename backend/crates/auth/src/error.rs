//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Phone number failed validation
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    /// Email address failed validation
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Malformed request payload
    #[error("{0}")]
    Validation(String),

    /// No identity holds this pending login session
    #[error("Login session not found")]
    SessionNotFound,

    /// One-time code did not match; the session is gone
    #[error("Invalid one-time code")]
    InvalidCode,

    /// Missing or rejected bearer credential
    #[error("Authentication required")]
    Unauthorized,

    /// Phone already registered
    #[error("Phone number already registered")]
    PhoneTaken,

    /// Identity changed since it was read
    #[error("Login state changed concurrently, retry")]
    StaleIdentity,

    /// Verification link unknown, used or expired
    #[error("Verification link not found or expired")]
    VerificationNotFound,

    /// Token codec failure
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidPhone(_) | AuthError::InvalidEmail(_) | AuthError::Validation(_) => {
                ErrorKind::BadRequest
            }
            AuthError::SessionNotFound | AuthError::InvalidCode | AuthError::Unauthorized => {
                ErrorKind::Unauthorized
            }
            AuthError::PhoneTaken | AuthError::StaleIdentity => ErrorKind::Conflict,
            AuthError::VerificationNotFound => ErrorKind::NotFound,
            AuthError::Token(TokenError::Signing(_)) => ErrorKind::InternalServerError,
            AuthError::Token(_) => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Token(TokenError::Signing(msg)) => {
                tracing::error!(message = %msg, "Token signing failed");
            }
            AuthError::InvalidCode => {
                tracing::warn!("Invalid one-time code submitted");
            }
            AuthError::StaleIdentity => {
                tracing::warn!("Concurrent login state modification");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for AuthError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AuthError::Validation(rejection.body_text())
    }
}
