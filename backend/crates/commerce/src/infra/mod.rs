//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::MemoryCommerceRepository;
pub use postgres::PgCommerceRepository;
