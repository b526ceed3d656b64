//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    email_verification::EmailVerification,
    identity::{Identity, PendingLogin},
};
pub use repository::{EmailVerificationRepository, IdentityRepository};
