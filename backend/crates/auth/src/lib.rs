//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, bearer gate
//!
//! ## Features
//! - Phone login in two steps: request a one-time code, exchange it for a token
//! - HS256 bearer tokens with a 24 hour lifetime
//! - Email ownership verification through single-use links
//!
//! ## Security Model
//! - Session ids and codes come from the OS CSPRNG and never appear in a response
//! - Any verification attempt, right or wrong, ends the pending session
//! - Identity writes are optimistic; concurrent logins for one phone cannot interleave
//! - Only SHA-256 hashes of verification link tokens are stored

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::notifier::{LogNotifier, Notifier};
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::handlers::AuthAppState;
pub use presentation::middleware::{AuthGate, AuthenticatedSubject, require_bearer};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
