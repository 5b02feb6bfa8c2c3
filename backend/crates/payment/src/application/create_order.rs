//! Create Order Use Case
//!
//! Checkout entry point: validates the order, builds the gateway request
//! for non-COD methods, then persists the pending order.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::application::build_transaction::TransactionRequestBuilder;
use crate::application::config::PaywayConfig;
use crate::domain::entity::order::{Customer, Order, OrderItem};
use crate::domain::entity::transaction_request::TransactionRequest;
use crate::domain::repository::OrderRepository;
use crate::domain::value_object::{
    payment_method::PaymentMethod, transaction_id::TransactionId,
};
use crate::error::PaymentResult;

/// Input DTO for create order
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    /// Client-assigned transaction id; generated when absent
    pub transaction_id: Option<String>,
    pub items: Vec<OrderItem>,
    pub customer: Customer,
    pub shipping_fee: Decimal,
    pub tip: Decimal,
    pub payment_method: PaymentMethod,
}

/// Output DTO for create order
#[derive(Debug, Clone)]
pub struct CreateOrderOutput {
    pub order: Order,
    /// `None` for cash on delivery
    pub payment_config: Option<TransactionRequest>,
}

/// Create Order Use Case
pub struct CreateOrderUseCase<R>
where
    R: OrderRepository,
{
    order_repo: Arc<R>,
    config: Arc<PaywayConfig>,
}

impl<R> CreateOrderUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(order_repo: Arc<R>, config: Arc<PaywayConfig>) -> Self {
        Self { order_repo, config }
    }

    pub async fn execute(&self, input: CreateOrderInput) -> PaymentResult<CreateOrderOutput> {
        let transaction_id = match input.transaction_id.as_deref() {
            Some(id) => TransactionId::new(id)?,
            None => TransactionId::generate(),
        };

        let order = Order::new(
            transaction_id,
            input.items,
            input.customer,
            input.shipping_fee,
            input.tip,
            input.payment_method,
        )?;

        // Build before persisting: an order whose request cannot be built
        // must not be left behind as pending
        let payment_config = if order.payment_method.uses_gateway() {
            let builder = TransactionRequestBuilder::new(self.config.clone());
            Some(builder.build(&order)?)
        } else {
            None
        };

        self.order_repo.create(&order).await?;

        tracing::info!(
            order_id = %order.order_id,
            tran_id = %order.transaction_id,
            amount = %order.amount,
            payment_method = %order.payment_method,
            "Order created"
        );

        Ok(CreateOrderOutput {
            order,
            payment_config,
        })
    }
}
