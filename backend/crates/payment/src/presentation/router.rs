//! Payment Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::PaywayConfig;
use crate::domain::repository::OrderRepository;
use crate::infra::postgres::PgOrderRepository;
use crate::presentation::handlers::{self, PaymentAppState};

/// Create the payment router with PostgreSQL repository
pub fn payment_router(repo: PgOrderRepository, config: PaywayConfig) -> Router {
    payment_router_generic(repo, config)
}

/// Create a payment router for any repository implementation
pub fn payment_router_generic<R>(repo: R, config: PaywayConfig) -> Router
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let state = PaymentAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/orders", post(handlers::create_order::<R>))
        .route("/orders/{tran_id}", get(handlers::get_order::<R>))
        .route(
            "/orders/{tran_id}/checkout",
            get(handlers::checkout_form::<R>),
        )
        .route("/payments/callback", post(handlers::payment_callback::<R>))
        .with_state(state)
}
