//! Request and response shapes

use chrono::{DateTime, Utc};
use kernel::id::{IdentityId, OrderId, ProductId};
use kernel::page::PageRequest;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Order, Product};
use crate::domain::value_objects::{ProductDraft, ProductIds};
use crate::error::CommerceResult;

// ============================================================================
// Request DTOs
// ============================================================================

/// Body of `POST /product` and `PATCH /product/{id}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProductPayload {
    pub fn try_into_draft(self) -> CommerceResult<ProductDraft> {
        ProductDraft::new(self.name, self.description, self.images)
    }
}

/// Body of `POST /order`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub product_ids: Vec<i64>,
}

impl CreateOrderRequest {
    pub fn try_into_input(self) -> CommerceResult<ProductIds> {
        ProductIds::new(self.product_ids)
    }
}

/// `?page=&limit=` on list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn into_request(self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            images: product.images,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub owner_id: IdentityId,
    pub created_at: DateTime<Utc>,
    pub products: Vec<ProductResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            owner_id: order.owner_id,
            created_at: order.created_at,
            products: order.products.into_iter().map(Into::into).collect(),
        }
    }
}
