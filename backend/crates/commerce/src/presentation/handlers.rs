//! HTTP Handlers

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, State};
use axum::http::StatusCode;
use std::sync::Arc;

use auth::AuthenticatedSubject;
use auth::domain::repository::IdentityRepository;
use kernel::id::{IdentityId, OrderId, ProductId};
use kernel::page::PageResponse;

use crate::application::{
    CatalogUseCase, CreateOrderUseCase, GetOrderUseCase, ListOrdersUseCase,
    ResolveIdentityUseCase,
};
use crate::domain::repository::{OrderRepository, ProductRepository};
use crate::error::{CommerceError, CommerceResult};
use crate::presentation::dto::{
    CreateOrderRequest, OrderResponse, PageQuery, ProductPayload, ProductResponse,
};

/// JSON body whose rejection renders as a [`CommerceError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(CommerceError))]
pub struct CommerceJson<T>(pub T);

/// Path parameters whose rejection renders as a [`CommerceError`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(CommerceError))]
pub struct CommercePath<T>(pub T);

/// Query string whose rejection renders as a [`CommerceError`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(CommerceError))]
pub struct CommerceQuery<T>(pub T);

/// Shared state for catalog and order handlers
pub struct CommerceAppState<R, A>
where
    R: ProductRepository + OrderRepository + Clone + Send + Sync + 'static,
    A: IdentityRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    /// Identity store shared with the auth module
    pub identities: Arc<A>,
}

impl<R, A> Clone for CommerceAppState<R, A>
where
    R: ProductRepository + OrderRepository + Clone + Send + Sync + 'static,
    A: IdentityRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            identities: self.identities.clone(),
        }
    }
}

impl<R, A> CommerceAppState<R, A>
where
    R: ProductRepository + OrderRepository + Clone + Send + Sync + 'static,
    A: IdentityRepository + Send + Sync + 'static,
{
    pub fn new(repo: R, identities: Arc<A>) -> Self {
        Self {
            repo: Arc::new(repo),
            identities,
        }
    }

    async fn current_identity(&self, subject: &AuthenticatedSubject) -> CommerceResult<IdentityId> {
        ResolveIdentityUseCase::new(self.identities.clone())
            .execute(subject.as_str())
            .await
    }
}

fn product_id(raw: i64) -> CommerceResult<ProductId> {
    ProductId::positive(raw)
        .ok_or_else(|| CommerceError::Validation(format!("Invalid product id: {}", raw)))
}

fn order_id(raw: i64) -> CommerceResult<OrderId> {
    OrderId::positive(raw)
        .ok_or_else(|| CommerceError::Validation(format!("Invalid order id: {}", raw)))
}

// ============================================================================
// Catalog
// ============================================================================

/// GET /product
pub async fn list_products<R, A>(
    State(state): State<CommerceAppState<R, A>>,
    CommerceQuery(query): CommerceQuery<PageQuery>,
) -> CommerceResult<Json<PageResponse<ProductResponse>>>
where
    R: ProductRepository + OrderRepository + Clone + Send + Sync + 'static,
    A: IdentityRepository + Send + Sync + 'static,
{
    let use_case = CatalogUseCase::new(state.repo.clone());
    let page = use_case.list(query.into_request()).await?;

    Ok(Json(page.map(ProductResponse::from).into_response()))
}

/// GET /product/{id}
pub async fn get_product<R, A>(
    State(state): State<CommerceAppState<R, A>>,
    CommercePath(id): CommercePath<i64>,
) -> CommerceResult<Json<ProductResponse>>
where
    R: ProductRepository + OrderRepository + Clone + Send + Sync + 'static,
    A: IdentityRepository + Send + Sync + 'static,
{
    let id = product_id(id)?;
    let product = CatalogUseCase::new(state.repo.clone()).get(id).await?;

    Ok(Json(product.into()))
}

/// POST /product
pub async fn create_product<R, A>(
    State(state): State<CommerceAppState<R, A>>,
    CommerceJson(payload): CommerceJson<ProductPayload>,
) -> CommerceResult<(StatusCode, Json<ProductResponse>)>
where
    R: ProductRepository + OrderRepository + Clone + Send + Sync + 'static,
    A: IdentityRepository + Send + Sync + 'static,
{
    let draft = payload.try_into_draft()?;
    let product = CatalogUseCase::new(state.repo.clone()).create(draft).await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// PATCH /product/{id}
pub async fn update_product<R, A>(
    State(state): State<CommerceAppState<R, A>>,
    CommercePath(id): CommercePath<i64>,
    CommerceJson(payload): CommerceJson<ProductPayload>,
) -> CommerceResult<Json<ProductResponse>>
where
    R: ProductRepository + OrderRepository + Clone + Send + Sync + 'static,
    A: IdentityRepository + Send + Sync + 'static,
{
    let id = product_id(id)?;
    let draft = payload.try_into_draft()?;
    let product = CatalogUseCase::new(state.repo.clone())
        .update(id, draft)
        .await?;

    Ok(Json(product.into()))
}

/// DELETE /product/{id}
pub async fn delete_product<R, A>(
    State(state): State<CommerceAppState<R, A>>,
    CommercePath(id): CommercePath<i64>,
) -> CommerceResult<StatusCode>
where
    R: ProductRepository + OrderRepository + Clone + Send + Sync + 'static,
    A: IdentityRepository + Send + Sync + 'static,
{
    let id = product_id(id)?;
    CatalogUseCase::new(state.repo.clone()).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Orders
// ============================================================================

/// POST /order
pub async fn create_order<R, A>(
    State(state): State<CommerceAppState<R, A>>,
    subject: AuthenticatedSubject,
    CommerceJson(req): CommerceJson<CreateOrderRequest>,
) -> CommerceResult<(StatusCode, Json<OrderResponse>)>
where
    R: ProductRepository + OrderRepository + Clone + Send + Sync + 'static,
    A: IdentityRepository + Send + Sync + 'static,
{
    let products = req.try_into_input()?;
    let owner = state.current_identity(&subject).await?;

    let order = CreateOrderUseCase::new(state.repo.clone())
        .execute(owner, products)
        .await?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /order/{id}
pub async fn get_order<R, A>(
    State(state): State<CommerceAppState<R, A>>,
    subject: AuthenticatedSubject,
    CommercePath(id): CommercePath<i64>,
) -> CommerceResult<Json<OrderResponse>>
where
    R: ProductRepository + OrderRepository + Clone + Send + Sync + 'static,
    A: IdentityRepository + Send + Sync + 'static,
{
    let id = order_id(id)?;
    let requester = state.current_identity(&subject).await?;

    let order = GetOrderUseCase::new(state.repo.clone())
        .execute(requester, id)
        .await?;

    Ok(Json(order.into()))
}

/// GET /my-orders
pub async fn list_my_orders<R, A>(
    State(state): State<CommerceAppState<R, A>>,
    subject: AuthenticatedSubject,
    CommerceQuery(query): CommerceQuery<PageQuery>,
) -> CommerceResult<Json<PageResponse<OrderResponse>>>
where
    R: ProductRepository + OrderRepository + Clone + Send + Sync + 'static,
    A: IdentityRepository + Send + Sync + 'static,
{
    let owner = state.current_identity(&subject).await?;

    let page = ListOrdersUseCase::new(state.repo.clone())
        .execute(owner, query.into_request())
        .await?;

    Ok(Json(page.map(OrderResponse::from).into_response()))
}
