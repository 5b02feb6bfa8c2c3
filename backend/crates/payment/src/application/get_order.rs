//! Get Order Use Case

use std::sync::Arc;

use crate::domain::entity::order::Order;
use crate::domain::repository::OrderRepository;
use crate::domain::value_object::transaction_id::TransactionId;
use crate::error::{PaymentError, PaymentResult};

/// Get Order Use Case
pub struct GetOrderUseCase<R>
where
    R: OrderRepository,
{
    order_repo: Arc<R>,
}

impl<R> GetOrderUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(order_repo: Arc<R>) -> Self {
        Self { order_repo }
    }

    pub async fn execute(&self, tran_id: &str) -> PaymentResult<Order> {
        let transaction_id = TransactionId::new(tran_id)
            .map_err(|_| PaymentError::OrderNotFound(tran_id.to_string()))?;

        self.order_repo
            .find_by_transaction_id(&transaction_id)
            .await?
            .ok_or_else(|| PaymentError::OrderNotFound(tran_id.to_string()))
    }
}
