//! Commerce Router

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use auth::domain::repository::IdentityRepository;
use auth::{AuthGate, require_bearer};

use crate::domain::repository::{OrderRepository, ProductRepository};
use crate::presentation::handlers::{self, CommerceAppState};

/// Create the catalog and order router
///
/// Catalog reads are public. Catalog writes and every order route sit
/// behind `gate`.
pub fn commerce_router<R, A>(state: CommerceAppState<R, A>, gate: AuthGate) -> Router
where
    R: ProductRepository + OrderRepository + Clone + Send + Sync + 'static,
    A: IdentityRepository + Send + Sync + 'static,
{
    let public = Router::new()
        .route("/product", get(handlers::list_products::<R, A>))
        .route("/product/{id}", get(handlers::get_product::<R, A>))
        .with_state(state.clone());

    let protected = Router::new()
        .route("/product", post(handlers::create_product::<R, A>))
        .route(
            "/product/{id}",
            patch(handlers::update_product::<R, A>)
                .delete(handlers::delete_product::<R, A>),
        )
        .route("/order", post(handlers::create_order::<R, A>))
        .route("/order/{id}", get(handlers::get_order::<R, A>))
        .route("/my-orders", get(handlers::list_my_orders::<R, A>))
        .route_layer(middleware::from_fn_with_state(gate, require_bearer))
        .with_state(state);

    public.merge(protected)
}
