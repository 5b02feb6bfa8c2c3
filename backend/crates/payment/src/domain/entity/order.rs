//! Order Entity
//!
//! The persisted order. Only its payment/delivery status fields change
//! after creation.

use chrono::{DateTime, Utc};
use kernel::id::OrderId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{
    delivery_status::DeliveryStatus,
    money::{MAX_AMOUNT, in_storable_range, round_cents},
    payment_method::PaymentMethod,
    payment_status::PaymentStatus, transaction_id::TransactionId,
};
use crate::error::{PaymentError, PaymentResult};

/// One order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    /// Display name sent to the gateway; falls back to `product_id`
    #[serde(default)]
    pub name: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderItem {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.product_id)
    }

    /// `None` when quantity × unit price overflows
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }

    fn validate(&self) -> PaymentResult<()> {
        if self.product_id.trim().is_empty() {
            return Err(PaymentError::Validation(
                "item product id is required".to_string(),
            ));
        }
        if self.quantity < 1 {
            return Err(PaymentError::Validation(format!(
                "item {} quantity must be at least 1",
                self.product_id
            )));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(PaymentError::Validation(format!(
                "item {} unit price must not be negative",
                self.product_id
            )));
        }
        if self.unit_price > MAX_AMOUNT {
            return Err(PaymentError::Validation(format!(
                "item {} unit price must not exceed {}",
                self.product_id, MAX_AMOUNT
            )));
        }
        Ok(())
    }
}

/// Customer contact details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Required by the gateway
    pub phone: String,
}

impl Customer {
    pub fn has_phone(&self) -> bool {
        !self.phone.trim().is_empty()
    }
}

/// Order entity
#[derive(Debug, Clone)]
pub struct Order {
    pub order_id: OrderId,
    pub transaction_id: TransactionId,
    pub items: Vec<OrderItem>,
    pub customer: Customer,
    pub shipping_fee: Decimal,
    pub tip: Decimal,
    /// Grand total, fixed at creation
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub delivery_status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of applying a gateway status to an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub previous: PaymentStatus,
    pub current: PaymentStatus,
    pub delivery_confirmed: bool,
}

impl StatusChange {
    /// An approved payment being moved to another status
    pub fn is_regression(&self) -> bool {
        self.previous == PaymentStatus::Approved && self.current != PaymentStatus::Approved
    }
}

impl Order {
    /// Create a new pending order, validating input and computing the amount
    pub fn new(
        transaction_id: TransactionId,
        items: Vec<OrderItem>,
        customer: Customer,
        shipping_fee: Decimal,
        tip: Decimal,
        payment_method: PaymentMethod,
    ) -> PaymentResult<Self> {
        if items.is_empty() {
            return Err(PaymentError::Validation(
                "order must contain at least one item".to_string(),
            ));
        }
        for item in &items {
            item.validate()?;
        }
        if !in_storable_range(shipping_fee) {
            return Err(PaymentError::Validation(format!(
                "shipping fee must be between 0 and {}",
                MAX_AMOUNT
            )));
        }
        if !in_storable_range(tip) {
            return Err(PaymentError::Validation(format!(
                "tip must be between 0 and {}",
                MAX_AMOUNT
            )));
        }
        if !customer.has_phone() {
            return Err(PaymentError::Validation(
                "customer phone is required".to_string(),
            ));
        }

        let amount = Self::compute_amount(&items, shipping_fee, tip)?;
        let now = Utc::now();

        Ok(Self {
            order_id: OrderId::new(),
            transaction_id,
            items,
            customer,
            shipping_fee,
            tip,
            amount,
            payment_method,
            payment_status: PaymentStatus::Pending,
            delivery_status: DeliveryStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// sum(quantity × unit price) + shipping + tip, rounded to cents.
    ///
    /// Fails when the total overflows or exceeds [`MAX_AMOUNT`].
    pub fn compute_amount(
        items: &[OrderItem],
        shipping_fee: Decimal,
        tip: Decimal,
    ) -> PaymentResult<Decimal> {
        let too_large =
            || PaymentError::Validation(format!("order total must not exceed {}", MAX_AMOUNT));

        let mut total = shipping_fee.checked_add(tip).ok_or_else(too_large)?;
        for item in items {
            let line = item.line_total().ok_or_else(too_large)?;
            total = total.checked_add(line).ok_or_else(too_large)?;
        }

        let amount = round_cents(total);
        if amount > MAX_AMOUNT {
            return Err(too_large());
        }
        Ok(amount)
    }

    /// Apply a reconciled gateway status.
    ///
    /// An approved payment also confirms delivery; other statuses leave
    /// the delivery status untouched.
    pub fn apply_payment_status(&mut self, status: PaymentStatus) -> StatusChange {
        let previous = self.payment_status;
        self.payment_status = status;

        let delivery_confirmed = status == PaymentStatus::Approved;
        if delivery_confirmed {
            self.delivery_status = DeliveryStatus::Confirmed;
        }
        self.updated_at = Utc::now();

        StatusChange {
            previous,
            current: status,
            delivery_confirmed,
        }
    }

    /// Whether a fresh checkout may still be started for this order
    pub fn awaits_payment(&self) -> bool {
        self.payment_method.uses_gateway() && self.payment_status == PaymentStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, quantity: u32, unit_price: i64) -> OrderItem {
        OrderItem {
            product_id: product_id.to_string(),
            name: None,
            quantity,
            unit_price: Decimal::from(unit_price),
        }
    }

    fn customer() -> Customer {
        Customer {
            phone: "012345678".to_string(),
            ..Default::default()
        }
    }

    fn order(method: PaymentMethod) -> Order {
        Order::new(
            TransactionId::new("T1").unwrap(),
            vec![item("P1", 2, 5)],
            customer(),
            Decimal::ONE,
            Decimal::ZERO,
            method,
        )
        .unwrap()
    }

    #[test]
    fn test_new_order_is_pending_with_amount() {
        let order = order(PaymentMethod::CardPay);
        assert_eq!(order.amount, Decimal::from(11));
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.delivery_status, DeliveryStatus::Pending);
    }

    #[test]
    fn test_amount_includes_tip() {
        let amount = Order::compute_amount(
            &[item("P1", 3, 2), item("P2", 1, 4)],
            Decimal::from(2),
            Decimal::from(1),
        )
        .unwrap();
        assert_eq!(amount, Decimal::from(13));
    }

    #[test]
    fn test_amount_overflow_is_rejected() {
        let huge = OrderItem {
            unit_price: Decimal::MAX,
            ..item("P1", 2, 0)
        };
        assert!(matches!(
            Order::compute_amount(&[huge], Decimal::ZERO, Decimal::ZERO),
            Err(PaymentError::Validation(_))
        ));

        let at_limit = OrderItem {
            unit_price: MAX_AMOUNT,
            ..item("P1", 1, 0)
        };
        assert_eq!(
            Order::compute_amount(&[at_limit.clone()], Decimal::ZERO, Decimal::ZERO).unwrap(),
            MAX_AMOUNT
        );
        assert!(Order::compute_amount(&[at_limit], Decimal::ONE, Decimal::ZERO).is_err());
    }

    #[test]
    fn test_validation() {
        let build = |items: Vec<OrderItem>, customer: Customer, shipping: Decimal| {
            Order::new(
                TransactionId::new("T1").unwrap(),
                items,
                customer,
                shipping,
                Decimal::ZERO,
                PaymentMethod::CardPay,
            )
        };

        let no_items = build(vec![], customer(), Decimal::ZERO);
        assert!(matches!(no_items, Err(PaymentError::Validation(_))));

        assert!(build(vec![item("P1", 0, 5)], customer(), Decimal::ZERO).is_err());
        assert!(build(vec![item("P1", 1, -5)], customer(), Decimal::ZERO).is_err());
        assert!(build(vec![item("P1", 1, 5)], customer(), Decimal::NEGATIVE_ONE).is_err());
        assert!(build(vec![item("P1", 1, 5)], Customer::default(), Decimal::ZERO).is_err());
        assert!(build(vec![item("P1", 1, 0)], customer(), Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_approved_confirms_delivery() {
        let mut order = order(PaymentMethod::CardPay);
        let change = order.apply_payment_status(PaymentStatus::Approved);
        assert!(change.delivery_confirmed);
        assert_eq!(order.delivery_status, DeliveryStatus::Confirmed);
    }

    #[test]
    fn test_other_status_keeps_delivery() {
        let mut order = order(PaymentMethod::CardPay);
        order.delivery_status = DeliveryStatus::Preparing;
        let change = order.apply_payment_status(PaymentStatus::Refunded);
        assert!(!change.delivery_confirmed);
        assert_eq!(order.payment_status, PaymentStatus::Refunded);
        assert_eq!(order.delivery_status, DeliveryStatus::Preparing);
    }

    #[test]
    fn test_regression_detection() {
        let mut order = order(PaymentMethod::CardPay);
        order.apply_payment_status(PaymentStatus::Approved);
        let change = order.apply_payment_status(PaymentStatus::Pending);
        assert!(change.is_regression());
    }

    #[test]
    fn test_item_display_name() {
        let mut line = item("P1", 1, 1);
        assert_eq!(line.display_name(), "P1");
        line.name = Some("Iced Latte".to_string());
        assert_eq!(line.display_name(), "Iced Latte");
    }

    #[test]
    fn test_cod_never_awaits_gateway() {
        assert!(!order(PaymentMethod::CashOnDelivery).awaits_payment());
        assert!(order(PaymentMethod::BankQrPay).awaits_payment());
    }
}
