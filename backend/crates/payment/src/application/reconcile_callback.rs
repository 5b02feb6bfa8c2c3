//! Reconcile Callback Use Case
//!
//! Applies an asynchronous gateway callback to the matching order.
//! Each callback is applied on its own; there is no ordering check
//! between callbacks for the same transaction.

use std::sync::Arc;

use crate::domain::entity::order::{Order, StatusChange};
use crate::domain::repository::OrderRepository;
use crate::domain::value_object::{
    payment_status::GatewayStatusCode, transaction_id::TransactionId,
};
use crate::error::{PaymentError, PaymentResult};

/// Input DTO for reconcile callback
#[derive(Debug, Clone)]
pub struct ReconcileCallbackInput {
    pub tran_id: String,
    pub status: GatewayStatusCode,
}

/// Output DTO for reconcile callback
#[derive(Debug, Clone)]
pub struct ReconcileCallbackOutput {
    pub order: Order,
    pub change: StatusChange,
}

/// Reconcile Callback Use Case
pub struct ReconcileCallbackUseCase<R>
where
    R: OrderRepository,
{
    order_repo: Arc<R>,
}

impl<R> ReconcileCallbackUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(order_repo: Arc<R>) -> Self {
        Self { order_repo }
    }

    pub async fn execute(
        &self,
        input: ReconcileCallbackInput,
    ) -> PaymentResult<ReconcileCallbackOutput> {
        let status = input
            .status
            .to_payment_status()
            .ok_or_else(|| PaymentError::InvalidStatus(input.status.to_string()))?;

        // An id the gateway could not have received from us matches no order
        let transaction_id = TransactionId::new(input.tran_id.as_str())
            .map_err(|_| PaymentError::OrderNotFound(input.tran_id.clone()))?;

        let mut order = self
            .order_repo
            .find_by_transaction_id(&transaction_id)
            .await?
            .ok_or_else(|| PaymentError::OrderNotFound(input.tran_id.clone()))?;

        let change = order.apply_payment_status(status);

        if change.is_regression() {
            tracing::warn!(
                tran_id = %transaction_id,
                previous = %change.previous,
                current = %change.current,
                "Callback moves an approved payment to another status"
            );
        }

        if !self.order_repo.update_status(&order).await? {
            return Err(PaymentError::OrderNotFound(input.tran_id));
        }

        tracing::info!(
            tran_id = %transaction_id,
            payment_status = %order.payment_status,
            delivery_status = %order.delivery_status,
            delivery_confirmed = change.delivery_confirmed,
            "Payment callback reconciled"
        );

        Ok(ReconcileCallbackOutput { order, change })
    }
}
