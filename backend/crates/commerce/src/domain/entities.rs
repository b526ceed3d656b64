//! Domain Entities
//!
//! Core business entities for the catalog and order domain.

use chrono::{DateTime, Utc};
use kernel::id::{IdentityId, OrderId, ProductId};

/// Product entity - a catalog item
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Image URLs, in display order
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set by a catalog delete; orders keep referencing the product
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Order entity - one owner bound to a fixed set of products
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub owner_id: IdentityId,
    /// Sorted by product id ascending
    pub products: Vec<Product>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn is_owned_by(&self, identity: IdentityId) -> bool {
        self.owner_id == identity
    }

    pub fn product_ids(&self) -> Vec<ProductId> {
        self.products.iter().map(|p| p.id).collect()
    }
}
