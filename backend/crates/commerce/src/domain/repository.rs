//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{IdentityId, OrderId, ProductId};
use kernel::page::{Page, PageRequest};

use crate::domain::entities::{Order, Product};
use crate::domain::value_objects::{ProductDraft, ProductIds};
use crate::error::CommerceResult;

/// Product repository trait
///
/// Deleted products are invisible to every method here.
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Create a new product
    async fn create(&self, draft: &ProductDraft) -> CommerceResult<Product>;

    /// Replace name, description and images; `ProductNotFound` if absent
    async fn update(&self, id: ProductId, draft: &ProductDraft) -> CommerceResult<Product>;

    /// Soft delete; `ProductNotFound` if absent or already deleted
    async fn delete(&self, id: ProductId) -> CommerceResult<()>;

    /// Find product by ID
    async fn find_by_id(&self, id: ProductId) -> CommerceResult<Option<Product>>;

    /// One page of products, newest first
    async fn list(&self, page: PageRequest) -> CommerceResult<Page<Product>>;
}

/// Order repository trait
#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    /// Create an order atomically
    ///
    /// Fails with `ProductsNotFound` if any requested product is absent or
    /// deleted, in which case nothing is written.
    async fn create(&self, owner: IdentityId, products: &ProductIds) -> CommerceResult<Order>;

    /// Find order by ID, products included even if since deleted
    async fn find_by_id(&self, id: OrderId) -> CommerceResult<Option<Order>>;

    /// One page of an owner's orders, newest first
    async fn list_by_owner(
        &self,
        owner: IdentityId,
        page: PageRequest,
    ) -> CommerceResult<Page<Order>>;
}
