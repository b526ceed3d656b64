//! In-process Repository Implementations
//!
//! Mutex-guarded tables with the same semantics as the PostgreSQL store.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::Utc;
use kernel::id::{IdentityId, OrderId, ProductId};
use kernel::page::{Page, PageRequest};
use tokio::sync::Mutex;

use crate::domain::entities::{Order, Product};
use crate::domain::repository::{OrderRepository, ProductRepository};
use crate::domain::value_objects::{ProductDraft, ProductIds};
use crate::error::{CommerceError, CommerceResult};

#[derive(Default)]
struct MemoryCommerceState {
    last_product_id: i64,
    last_order_id: i64,
    products: BTreeMap<ProductId, Product>,
    /// Orders hold product ids; products are joined on read
    orders: BTreeMap<OrderId, StoredOrder>,
}

struct StoredOrder {
    owner_id: IdentityId,
    product_ids: Vec<ProductId>,
    created_at: chrono::DateTime<Utc>,
}

impl MemoryCommerceState {
    fn live_product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id).filter(|p| !p.is_deleted())
    }

    fn materialize(&self, id: OrderId, stored: &StoredOrder) -> Order {
        Order {
            id,
            owner_id: stored.owner_id,
            products: stored
                .product_ids
                .iter()
                .filter_map(|pid| self.products.get(pid).cloned())
                .collect(),
            created_at: stored.created_at,
        }
    }
}

fn page_of<T>(newest_first: Vec<T>, page: PageRequest) -> Page<T> {
    let total = newest_first.len() as i64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(0);
    let items = newest_first.into_iter().skip(offset).take(limit).collect();
    Page::new(items, total, page)
}

/// In-memory catalog and order repository
#[derive(Clone, Default)]
pub struct MemoryCommerceRepository {
    state: Arc<Mutex<MemoryCommerceState>>,
}

impl MemoryCommerceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders across all owners
    pub async fn order_count(&self) -> usize {
        self.state.lock().await.orders.len()
    }
}

impl ProductRepository for MemoryCommerceRepository {
    async fn create(&self, draft: &ProductDraft) -> CommerceResult<Product> {
        let mut state = self.state.lock().await;
        state.last_product_id += 1;

        let now = Utc::now();
        let product = Product {
            id: ProductId::new(state.last_product_id),
            name: draft.name().to_string(),
            description: draft.description().to_string(),
            images: draft.images().to_vec(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        state.products.insert(product.id, product.clone());

        Ok(product)
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> CommerceResult<Product> {
        let mut state = self.state.lock().await;

        let product = state
            .products
            .get_mut(&id)
            .filter(|p| !p.is_deleted())
            .ok_or(CommerceError::ProductNotFound(id))?;

        product.name = draft.name().to_string();
        product.description = draft.description().to_string();
        product.images = draft.images().to_vec();
        product.updated_at = Utc::now();

        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> CommerceResult<()> {
        let mut state = self.state.lock().await;

        let product = state
            .products
            .get_mut(&id)
            .filter(|p| !p.is_deleted())
            .ok_or(CommerceError::ProductNotFound(id))?;

        product.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn find_by_id(&self, id: ProductId) -> CommerceResult<Option<Product>> {
        let state = self.state.lock().await;
        Ok(state.live_product(id).cloned())
    }

    async fn list(&self, page: PageRequest) -> CommerceResult<Page<Product>> {
        let state = self.state.lock().await;
        let live: Vec<Product> = state
            .products
            .values()
            .rev()
            .filter(|p| !p.is_deleted())
            .cloned()
            .collect();
        Ok(page_of(live, page))
    }
}

impl OrderRepository for MemoryCommerceRepository {
    async fn create(&self, owner: IdentityId, products: &ProductIds) -> CommerceResult<Order> {
        // Held across check and insert
        let mut state = self.state.lock().await;

        let found: BTreeSet<ProductId> = products
            .iter()
            .filter(|id| state.live_product(*id).is_some())
            .collect();
        let missing = products.missing_from(&found);
        if !missing.is_empty() {
            return Err(CommerceError::ProductsNotFound(missing));
        }

        state.last_order_id += 1;
        let id = OrderId::new(state.last_order_id);
        let stored = StoredOrder {
            owner_id: owner,
            product_ids: products.iter().collect(),
            created_at: Utc::now(),
        };
        let order = state.materialize(id, &stored);
        state.orders.insert(id, stored);

        Ok(order)
    }

    async fn find_by_id(&self, id: OrderId) -> CommerceResult<Option<Order>> {
        let state = self.state.lock().await;
        Ok(state
            .orders
            .get(&id)
            .map(|stored| state.materialize(id, stored)))
    }

    async fn list_by_owner(
        &self,
        owner: IdentityId,
        page: PageRequest,
    ) -> CommerceResult<Page<Order>> {
        let state = self.state.lock().await;
        let owned: Vec<Order> = state
            .orders
            .iter()
            .rev()
            .filter(|(_, stored)| stored.owner_id == owner)
            .map(|(id, stored)| state.materialize(*id, stored))
            .collect();
        Ok(page_of(owned, page))
    }
}
