//! Get Order Use Case

use std::sync::Arc;

use kernel::id::{IdentityId, OrderId};

use crate::domain::entities::Order;
use crate::domain::repository::OrderRepository;
use crate::error::{CommerceError, CommerceResult};

/// Get Order Use Case
pub struct GetOrderUseCase<O>
where
    O: OrderRepository,
{
    order_repo: Arc<O>,
}

impl<O> GetOrderUseCase<O>
where
    O: OrderRepository,
{
    pub fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    /// Fetch an order on behalf of `requester`, who must own it
    pub async fn execute(&self, requester: IdentityId, id: OrderId) -> CommerceResult<Order> {
        let order = self
            .order_repo
            .find_by_id(id)
            .await?
            .ok_or(CommerceError::OrderNotFound(id))?;

        if !order.is_owned_by(requester) {
            tracing::warn!(order_id = %id, requester = %requester, "Order requested by non-owner");
            return Err(CommerceError::Forbidden);
        }

        Ok(order)
    }
}
