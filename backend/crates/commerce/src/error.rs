//! Commerce Error Types
//!
//! This module provides catalog and order error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::{OrderId, ProductId};
use thiserror::Error;

/// Commerce-specific result type alias
pub type CommerceResult<T> = Result<T, CommerceError>;

/// Commerce-specific error variants
#[derive(Debug, Error)]
pub enum CommerceError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Order without products
    #[error("Order must contain at least one product")]
    EmptyProductSet,

    /// Product absent or deleted
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),

    /// Some requested products do not exist
    #[error("Products not found: {}", join_ids(.0))]
    ProductsNotFound(Vec<ProductId>),

    /// Order absent
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),

    /// Order belongs to someone else
    #[error("Order belongs to another user")]
    Forbidden,

    /// Token subject has no identity
    #[error("Authentication required")]
    Unauthorized,

    /// Identity lookup failure
    #[error(transparent)]
    Auth(#[from] auth::AuthError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

fn join_ids(ids: &[ProductId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl CommerceError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommerceError::Validation(_) | CommerceError::EmptyProductSet => ErrorKind::BadRequest,
            CommerceError::ProductNotFound(_)
            | CommerceError::ProductsNotFound(_)
            | CommerceError::OrderNotFound(_) => ErrorKind::NotFound,
            CommerceError::Forbidden => ErrorKind::Forbidden,
            CommerceError::Unauthorized => ErrorKind::Unauthorized,
            CommerceError::Auth(e) => e.kind(),
            CommerceError::Database(_) | CommerceError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            CommerceError::Database(e) => AppError::from(e),
            CommerceError::Auth(e) => e.into_app_error(),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CommerceError::Database(e) => {
                tracing::error!(error = %e, "Commerce database error");
            }
            CommerceError::Internal(msg) => {
                tracing::error!(message = %msg, "Commerce internal error");
            }
            CommerceError::Auth(e) if e.kind().is_server_error() => {
                tracing::error!(error = %e, "Identity lookup failed");
            }
            CommerceError::Forbidden => {
                tracing::warn!("Order access by non-owner");
            }
            _ => {
                tracing::debug!(error = %self, "Commerce error");
            }
        }
    }
}

impl IntoResponse for CommerceError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<JsonRejection> for CommerceError {
    fn from(rejection: JsonRejection) -> Self {
        CommerceError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for CommerceError {
    fn from(rejection: PathRejection) -> Self {
        CommerceError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for CommerceError {
    fn from(rejection: QueryRejection) -> Self {
        CommerceError::Validation(rejection.body_text())
    }
}
