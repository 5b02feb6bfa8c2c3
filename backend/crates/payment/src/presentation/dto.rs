//! API DTOs (Data Transfer Objects)

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::create_order::{CreateOrderInput, CreateOrderOutput};
use crate::application::reconcile_callback::{ReconcileCallbackInput, ReconcileCallbackOutput};
use crate::domain::entity::order::{Customer, Order, OrderItem};
use crate::domain::entity::transaction_request::TransactionRequest;
use crate::domain::value_object::{
    delivery_status::DeliveryStatus, money::to_fixed_2, payment_method::PaymentMethod,
    payment_status::{GatewayStatusCode, PaymentStatus},
};
use crate::error::PaymentError;

/// Request for POST /orders
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub transaction_id: Option<String>,
    pub items: Vec<OrderItem>,
    pub customer: Customer,
    #[serde(default)]
    pub shipping_fee: Decimal,
    #[serde(default)]
    pub tip: Decimal,
    pub payment_method: PaymentMethod,
}

impl From<CreateOrderRequest> for CreateOrderInput {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            transaction_id: req.transaction_id,
            items: req.items,
            customer: req.customer,
            shipping_fee: req.shipping_fee,
            tip: req.tip,
            payment_method: req.payment_method,
        }
    }
}

/// Order summary returned to the client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: Uuid,
    pub transaction_id: String,
    pub items: Vec<OrderItem>,
    pub customer: Customer,
    pub shipping_fee: String,
    pub tip: String,
    pub amount: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub delivery_status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.order_id.into_uuid(),
            transaction_id: order.transaction_id.to_string(),
            shipping_fee: to_fixed_2(order.shipping_fee),
            tip: to_fixed_2(order.tip),
            amount: to_fixed_2(order.amount),
            items: order.items,
            customer: order.customer,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            delivery_status: order.delivery_status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Response for POST /orders
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order: OrderResponse,
    /// Absent for cash on delivery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_config: Option<TransactionRequest>,
}

impl From<CreateOrderOutput> for CreateOrderResponse {
    fn from(output: CreateOrderOutput) -> Self {
        Self {
            order: output.order.into(),
            payment_config: output.payment_config,
        }
    }
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Gateway pushback body for POST /payments/callback
///
/// Read leniently: a missing or mistyped field is left empty so the
/// reconciler can reject it while the gateway still gets a 200.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallbackRequest {
    pub tran_id: String,
    pub status: Option<GatewayStatusCode>,
}

impl CallbackRequest {
    /// Parse a JSON or form-encoded body. `None` when neither yields the
    /// callback fields.
    pub fn parse(content_type: Option<&str>, body: &[u8]) -> Option<Self> {
        let is_form = content_type.is_some_and(|ct| ct.starts_with(FORM_CONTENT_TYPE));
        if is_form {
            Self::from_form(body)
        } else {
            Self::from_json(body).or_else(|| Self::from_form(body))
        }
    }

    fn from_json(body: &[u8]) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_slice(body).ok()?;
        let object = value.as_object()?;

        let tran_id = match object.get("tran_id") {
            Some(serde_json::Value::String(id)) => id.clone(),
            Some(serde_json::Value::Number(id)) => id.to_string(),
            _ => String::new(),
        };
        let status = object
            .get("status")
            .cloned()
            .and_then(|status| serde_json::from_value(status).ok());

        Some(Self { tran_id, status })
    }

    fn from_form(body: &[u8]) -> Option<Self> {
        let fields: HashMap<String, String> = serde_urlencoded::from_bytes(body).ok()?;
        if !fields.contains_key("tran_id") && !fields.contains_key("status") {
            return None;
        }

        Some(Self {
            tran_id: fields.get("tran_id").cloned().unwrap_or_default(),
            status: fields.get("status").cloned().map(GatewayStatusCode::Text),
        })
    }
}

impl TryFrom<CallbackRequest> for ReconcileCallbackInput {
    type Error = PaymentError;

    fn try_from(req: CallbackRequest) -> Result<Self, Self::Error> {
        let status = req.status.ok_or_else(|| {
            PaymentError::InvalidStatus(format!("missing status for transaction {}", req.tran_id))
        })?;

        Ok(Self {
            tran_id: req.tran_id,
            status,
        })
    }
}

/// Acknowledgement for POST /payments/callback, always sent with 200
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackAck {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_status: Option<DeliveryStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl CallbackAck {
    pub fn reconciled(output: &ReconcileCallbackOutput) -> Self {
        Self {
            ok: true,
            payment_status: Some(output.order.payment_status),
            delivery_status: Some(output.order.delivery_status),
            reason: None,
        }
    }

    pub fn rejected(err: &PaymentError) -> Self {
        Self {
            ok: false,
            payment_status: None,
            delivery_status: None,
            reason: Some(err.reason()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_request_defaults() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{
                "items": [{"productId": "P1", "quantity": 2, "unitPrice": 5}],
                "customer": {"phone": "012345678"},
                "paymentMethod": "abapay_khqr"
            }"#,
        )
        .unwrap();

        assert!(req.transaction_id.is_none());
        assert_eq!(req.shipping_fee, Decimal::ZERO);
        assert_eq!(req.tip, Decimal::ZERO);
        assert_eq!(req.payment_method, PaymentMethod::BankQrPay);
        assert_eq!(req.items[0].unit_price, Decimal::from(5));
    }

    #[test]
    fn test_callback_request_accepts_snake_case() {
        let req = CallbackRequest::parse(
            Some("application/json"),
            br#"{"tran_id": "T1", "status": "3"}"#,
        )
        .unwrap();
        assert_eq!(req.tran_id, "T1");
        assert_eq!(req.status.and_then(|s| s.as_integer()), Some(3));
    }

    #[test]
    fn test_callback_request_lenient_status() {
        for body in [
            r#"{"tran_id": "T1", "status": null}"#,
            r#"{"tran_id": "T1", "status": true}"#,
            r#"{"tran_id": "T1"}"#,
        ] {
            let req = CallbackRequest::parse(Some("application/json"), body.as_bytes()).unwrap();
            assert_eq!(req.tran_id, "T1");
            assert!(req.status.is_none(), "{}", body);
            assert!(matches!(
                ReconcileCallbackInput::try_from(req),
                Err(PaymentError::InvalidStatus(_))
            ));
        }
    }

    #[test]
    fn test_callback_request_form_encoded() {
        let req = CallbackRequest::parse(
            Some("application/x-www-form-urlencoded"),
            b"tran_id=T1&status=0",
        )
        .unwrap();
        assert_eq!(req.tran_id, "T1");
        assert_eq!(req.status.and_then(|s| s.as_integer()), Some(0));

        // Form body without a content type
        let req = CallbackRequest::parse(None, b"tran_id=T2&status=7").unwrap();
        assert_eq!(req.tran_id, "T2");
    }

    #[test]
    fn test_callback_request_unreadable_body() {
        assert!(CallbackRequest::parse(Some("application/json"), b"").is_none());
        assert!(CallbackRequest::parse(None, b"[1, 2]").is_none());
    }

    #[test]
    fn test_rejected_ack_omits_statuses() {
        let ack = CallbackAck::rejected(&PaymentError::OrderNotFound("T9".to_string()));
        let json = serde_json::to_value(&ack).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"ok": false, "reason": "order_not_found"})
        );
    }
}
