//! Commerce Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Products, orders, validated inputs, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Product catalog with paged listing and soft delete
//! - Orders binding one identity to a fixed set of live products
//!
//! ## Consistency
//! - An order is written only if every requested product exists and is live;
//!   the check and the inserts share one transaction
//! - Deleted products stay attached to the orders that reference them
//! - Orders are visible to their owner only

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{CommerceError, CommerceResult};
pub use infra::{memory::MemoryCommerceRepository, postgres::PgCommerceRepository};
pub use presentation::handlers::CommerceAppState;
pub use presentation::router::commerce_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
