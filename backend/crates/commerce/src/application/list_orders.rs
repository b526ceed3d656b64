//! List Orders Use Case

use std::sync::Arc;

use kernel::id::IdentityId;
use kernel::page::{Page, PageRequest};

use crate::domain::entities::Order;
use crate::domain::repository::OrderRepository;
use crate::error::CommerceResult;

/// List Orders Use Case
pub struct ListOrdersUseCase<O>
where
    O: OrderRepository,
{
    order_repo: Arc<O>,
}

impl<O> ListOrdersUseCase<O>
where
    O: OrderRepository,
{
    pub fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    pub async fn execute(&self, owner: IdentityId, page: PageRequest) -> CommerceResult<Page<Order>> {
        self.order_repo.list_by_owner(owner, page).await
    }
}
