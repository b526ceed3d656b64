//! PostgreSQL Repository Implementations

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use kernel::id::{IdentityId, OrderId, ProductId};
use kernel::page::{Page, PageRequest};
use sqlx::{PgConnection, PgPool};

use crate::domain::entities::{Order, Product};
use crate::domain::repository::{OrderRepository, ProductRepository};
use crate::domain::value_objects::{ProductDraft, ProductIds};
use crate::error::{CommerceError, CommerceResult};

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgCommerceRepository {
    pool: PgPool,
}

impl PgCommerceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for PgCommerceRepository {
    async fn create(&self, draft: &ProductDraft) -> CommerceResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, description, images)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, images, created_at, updated_at, deleted_at
            "#,
        )
        .bind(draft.name())
        .bind(draft.description())
        .bind(draft.images())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_product())
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> CommerceResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products SET
                name = $2,
                description = $3,
                images = $4,
                updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, name, description, images, created_at, updated_at, deleted_at
            "#,
        )
        .bind(id.get())
        .bind(draft.name())
        .bind(draft.description())
        .bind(draft.images())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductRow::into_product)
            .ok_or(CommerceError::ProductNotFound(id))
    }

    async fn delete(&self, id: ProductId) -> CommerceResult<()> {
        let deleted = sqlx::query(
            "UPDATE products SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id.get())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if deleted == 0 {
            return Err(CommerceError::ProductNotFound(id));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: ProductId) -> CommerceResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, images, created_at, updated_at, deleted_at
            FROM products
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn list(&self, page: PageRequest) -> CommerceResult<Page<Product>> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await?;

        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, images, created_at, updated_at, deleted_at
            FROM products
            WHERE deleted_at IS NULL
            ORDER BY id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let items = rows.into_iter().map(ProductRow::into_product).collect();
        Ok(Page::new(items, total, page))
    }
}

// ============================================================================
// Order Repository Implementation
// ============================================================================

impl OrderRepository for PgCommerceRepository {
    async fn create(&self, owner: IdentityId, products: &ProductIds) -> CommerceResult<Order> {
        let requested = products.to_vec();
        let mut tx = self.pool.begin().await?;

        // Share locks keep the products live until commit
        let found = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM products
            WHERE id = ANY($1) AND deleted_at IS NULL
            FOR SHARE
            "#,
        )
        .bind(&requested)
        .fetch_all(&mut *tx)
        .await?;

        let found: BTreeSet<ProductId> = found.into_iter().map(ProductId::new).collect();
        let missing = products.missing_from(&found);
        if !missing.is_empty() {
            // Dropping the transaction rolls it back
            return Err(CommerceError::ProductsNotFound(missing));
        }

        let (order_id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            "INSERT INTO orders (owner_id) VALUES ($1) RETURNING id, created_at",
        )
        .bind(owner.get())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO order_products (order_id, product_id)
            SELECT $1, product_id FROM UNNEST($2::BIGINT[]) AS product_id
            "#,
        )
        .bind(order_id)
        .bind(&requested)
        .execute(&mut *tx)
        .await?;

        let mut products = fetch_order_products(&mut tx, &[order_id]).await?;

        tx.commit().await?;

        Ok(Order {
            id: OrderId::new(order_id),
            owner_id: owner,
            products: products.remove(&order_id).unwrap_or_default(),
            created_at,
        })
    }

    async fn find_by_id(&self, id: OrderId) -> CommerceResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, owner_id, created_at FROM orders WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut conn = self.pool.acquire().await?;
        let mut products = fetch_order_products(&mut conn, &[row.id]).await?;
        let order_products = products.remove(&row.id).unwrap_or_default();

        Ok(Some(row.into_order(order_products)))
    }

    async fn list_by_owner(
        &self,
        owner: IdentityId,
        page: PageRequest,
    ) -> CommerceResult<Page<Order>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE owner_id = $1")
            .bind(owner.get())
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, owner_id, created_at
            FROM orders
            WHERE owner_id = $1
            ORDER BY id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner.get())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let order_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut conn = self.pool.acquire().await?;
        let mut products = fetch_order_products(&mut conn, &order_ids).await?;

        let items = rows
            .into_iter()
            .map(|row| {
                let order_products = products.remove(&row.id).unwrap_or_default();
                row.into_order(order_products)
            })
            .collect();

        Ok(Page::new(items, total, page))
    }
}

/// Products of each order, ascending by product id, deleted ones included
async fn fetch_order_products(
    conn: &mut PgConnection,
    order_ids: &[i64],
) -> CommerceResult<HashMap<i64, Vec<Product>>> {
    if order_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, OrderProductRow>(
        r#"
        SELECT
            op.order_id,
            p.id,
            p.name,
            p.description,
            p.images,
            p.created_at,
            p.updated_at,
            p.deleted_at
        FROM order_products op
        JOIN products p ON p.id = op.product_id
        WHERE op.order_id = ANY($1)
        ORDER BY op.order_id, p.id
        "#,
    )
    .bind(order_ids)
    .fetch_all(&mut *conn)
    .await?;

    let mut grouped: HashMap<i64, Vec<Product>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.order_id)
            .or_default()
            .push(row.product.into_product());
    }

    Ok(grouped)
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    images: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name,
            description: self.description,
            images: self.images,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    owner_id: i64,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, products: Vec<Product>) -> Order {
        Order {
            id: OrderId::new(self.id),
            owner_id: IdentityId::new(self.owner_id),
            products,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderProductRow {
    order_id: i64,
    #[sqlx(flatten)]
    product: ProductRow,
}
