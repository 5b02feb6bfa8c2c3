//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::OrderId;
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entity::order::{Customer, Order, OrderItem};
use crate::domain::repository::OrderRepository;
use crate::domain::value_object::{
    delivery_status::DeliveryStatus, payment_method::PaymentMethod,
    payment_status::PaymentStatus, transaction_id::TransactionId,
};
use crate::error::{PaymentError, PaymentResult};

/// PostgreSQL-backed order repository
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for PgOrderRepository {
    async fn create(&self, order: &Order) -> PaymentResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO orders (
                order_id,
                transaction_id,
                items,
                customer_first_name,
                customer_last_name,
                customer_email,
                customer_phone,
                shipping_fee,
                tip,
                amount,
                payment_method,
                payment_status,
                delivery_status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(order.order_id.into_uuid())
        .bind(order.transaction_id.as_str())
        .bind(Json(&order.items))
        .bind(order.customer.first_name.as_deref())
        .bind(order.customer.last_name.as_deref())
        .bind(order.customer.email.as_deref())
        .bind(&order.customer.phone)
        .bind(order.shipping_fee)
        .bind(order.tip)
        .bind(order.amount)
        .bind(order.payment_method.code())
        .bind(order.payment_status.code())
        .bind(order.delivery_status.code())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                tracing::debug!(tran_id = %order.transaction_id, "Order row inserted");
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::warn!(tran_id = %order.transaction_id, "Transaction id already in use");
                Err(PaymentError::DuplicateTransaction(
                    order.transaction_id.to_string(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: &TransactionId,
    ) -> PaymentResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT
                order_id,
                transaction_id,
                items,
                customer_first_name,
                customer_last_name,
                customer_email,
                customer_phone,
                shipping_fee,
                tip,
                amount,
                payment_method,
                payment_status,
                delivery_status,
                created_at,
                updated_at
            FROM orders
            WHERE transaction_id = $1
            "#,
        )
        .bind(transaction_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(OrderRow::into_order).transpose()
    }

    async fn update_status(&self, order: &Order) -> PaymentResult<bool> {
        let rows = sqlx::query(
            r#"
            UPDATE orders
            SET payment_status = $2,
                delivery_status = $3,
                updated_at = $4
            WHERE transaction_id = $1
            "#,
        )
        .bind(order.transaction_id.as_str())
        .bind(order.payment_status.code())
        .bind(order.delivery_status.code())
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: Uuid,
    transaction_id: String,
    items: Json<Vec<OrderItem>>,
    customer_first_name: Option<String>,
    customer_last_name: Option<String>,
    customer_email: Option<String>,
    customer_phone: String,
    shipping_fee: Decimal,
    tip: Decimal,
    amount: Decimal,
    payment_method: String,
    payment_status: String,
    delivery_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> PaymentResult<Order> {
        let corrupt = |column: &str, value: &str| {
            PaymentError::Internal(format!(
                "order {} has unknown {column} '{value}'",
                self.transaction_id
            ))
        };

        let payment_method = PaymentMethod::from_code(&self.payment_method)
            .ok_or_else(|| corrupt("payment_method", &self.payment_method))?;
        let payment_status = PaymentStatus::from_code(&self.payment_status)
            .ok_or_else(|| corrupt("payment_status", &self.payment_status))?;
        let delivery_status = DeliveryStatus::from_code(&self.delivery_status)
            .ok_or_else(|| corrupt("delivery_status", &self.delivery_status))?;
        let transaction_id = TransactionId::new(self.transaction_id.as_str())
            .map_err(|_| corrupt("transaction_id", &self.transaction_id))?;

        Ok(Order {
            order_id: OrderId::from_uuid(self.order_id),
            transaction_id,
            items: self.items.0,
            customer: Customer {
                first_name: self.customer_first_name,
                last_name: self.customer_last_name,
                email: self.customer_email,
                phone: self.customer_phone,
            },
            shipping_fee: self.shipping_fee,
            tip: self.tip,
            amount: self.amount,
            payment_method,
            payment_status,
            delivery_status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
