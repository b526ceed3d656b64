//! Catalog Use Case
//!
//! CRUD and paged listing over products.

use std::sync::Arc;

use kernel::id::ProductId;
use kernel::page::{Page, PageRequest};

use crate::domain::entities::Product;
use crate::domain::repository::ProductRepository;
use crate::domain::value_objects::ProductDraft;
use crate::error::{CommerceError, CommerceResult};

/// Catalog Use Case
pub struct CatalogUseCase<P>
where
    P: ProductRepository,
{
    product_repo: Arc<P>,
}

impl<P> CatalogUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(product_repo: Arc<P>) -> Self {
        Self { product_repo }
    }

    pub async fn create(&self, draft: ProductDraft) -> CommerceResult<Product> {
        let product = self.product_repo.create(&draft).await?;
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    pub async fn update(&self, id: ProductId, draft: ProductDraft) -> CommerceResult<Product> {
        let product = self.product_repo.update(id, &draft).await?;
        tracing::info!(product_id = %id, "Product updated");
        Ok(product)
    }

    pub async fn delete(&self, id: ProductId) -> CommerceResult<()> {
        self.product_repo.delete(id).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    pub async fn get(&self, id: ProductId) -> CommerceResult<Product> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or(CommerceError::ProductNotFound(id))
    }

    pub async fn list(&self, page: PageRequest) -> CommerceResult<Page<Product>> {
        self.product_repo.list(page).await
    }
}
