//! In-memory Repository Implementation
//!
//! Process-local order store for tests and local runs without a database.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::order::Order;
use crate::domain::repository::OrderRepository;
use crate::domain::value_object::transaction_id::TransactionId;
use crate::error::{PaymentError, PaymentResult};

/// Orders keyed by transaction id
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<String, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &Order) -> PaymentResult<()> {
        let mut orders = self.orders.write().await;
        let key = order.transaction_id.as_str();
        if orders.contains_key(key) {
            return Err(PaymentError::DuplicateTransaction(key.to_string()));
        }
        orders.insert(key.to_string(), order.clone());
        Ok(())
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: &TransactionId,
    ) -> PaymentResult<Option<Order>> {
        Ok(self.orders.read().await.get(transaction_id.as_str()).cloned())
    }

    async fn update_status(&self, order: &Order) -> PaymentResult<bool> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(order.transaction_id.as_str()) {
            Some(stored) => {
                stored.payment_status = order.payment_status;
                stored.delivery_status = order.delivery_status;
                stored.updated_at = order.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
