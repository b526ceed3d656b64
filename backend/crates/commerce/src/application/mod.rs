//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod catalog;
pub mod create_order;
pub mod current_identity;
pub mod get_order;
pub mod list_orders;

pub use catalog::CatalogUseCase;
pub use create_order::CreateOrderUseCase;
pub use current_identity::ResolveIdentityUseCase;
pub use get_order::GetOrderUseCase;
pub use list_orders::ListOrdersUseCase;
