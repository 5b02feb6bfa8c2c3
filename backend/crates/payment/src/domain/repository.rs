//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::order::Order;
use crate::domain::value_object::transaction_id::TransactionId;
use crate::error::PaymentResult;

/// Order repository trait
#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    /// Persist a new order; a taken transaction id is `DuplicateTransaction`
    async fn create(&self, order: &Order) -> PaymentResult<()>;

    /// Find order by gateway transaction id
    async fn find_by_transaction_id(
        &self,
        transaction_id: &TransactionId,
    ) -> PaymentResult<Option<Order>>;

    /// Write the order's payment and delivery status.
    /// Returns false when no order carries the transaction id.
    async fn update_status(&self, order: &Order) -> PaymentResult<bool>;
}
