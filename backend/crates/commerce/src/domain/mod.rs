//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Product, Order)
//! - Domain value objects (ProductDraft, ProductIds)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
