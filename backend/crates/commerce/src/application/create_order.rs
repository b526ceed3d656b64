//! Create Order Use Case

use std::sync::Arc;

use kernel::id::IdentityId;

use crate::domain::entities::Order;
use crate::domain::repository::OrderRepository;
use crate::domain::value_objects::ProductIds;
use crate::error::{CommerceError, CommerceResult};

/// Create Order Use Case
pub struct CreateOrderUseCase<O>
where
    O: OrderRepository,
{
    order_repo: Arc<O>,
}

impl<O> CreateOrderUseCase<O>
where
    O: OrderRepository,
{
    pub fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    pub async fn execute(&self, owner: IdentityId, products: ProductIds) -> CommerceResult<Order> {
        match self.order_repo.create(owner, &products).await {
            Ok(order) => {
                tracing::info!(
                    order_id = %order.id,
                    owner_id = %owner,
                    products = order.products.len(),
                    "Order created"
                );
                Ok(order)
            }
            Err(CommerceError::ProductsNotFound(missing)) => {
                tracing::warn!(owner_id = %owner, missing = ?missing, "Order references unknown products");
                Err(CommerceError::ProductsNotFound(missing))
            }
            Err(e) => Err(e),
        }
    }
}
