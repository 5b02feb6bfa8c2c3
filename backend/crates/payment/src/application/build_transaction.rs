//! Build Transaction Request
//!
//! Turns an order into the signed form the hosted payment page expects.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::config::PaywayConfig;
use crate::domain::entity::{order::Order, transaction_request::TransactionRequest};
use crate::domain::services::{GatewayFields, compute_integrity_hash, field};
use crate::domain::value_object::money::to_fixed_2;
use crate::error::{PaymentError, PaymentResult};

/// Literal `type` marker for a purchase
pub const TRANSACTION_TYPE_PURCHASE: &str = "purchase";

/// `req_time` layout (UTC)
const REQ_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Line item as the gateway expects it inside the `items` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayItem {
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Transaction request builder
pub struct TransactionRequestBuilder {
    config: Arc<PaywayConfig>,
}

impl TransactionRequestBuilder {
    pub fn new(config: Arc<PaywayConfig>) -> Self {
        Self { config }
    }

    /// Build with a fresh request timestamp
    pub fn build(&self, order: &Order) -> PaymentResult<TransactionRequest> {
        self.build_at(order, Utc::now())
    }

    /// Build for a given request time
    pub fn build_at(&self, order: &Order, now: DateTime<Utc>) -> PaymentResult<TransactionRequest> {
        let payment_option = order.payment_method.gateway_option().ok_or_else(|| {
            PaymentError::Validation(format!(
                "payment method {} is not paid through the gateway",
                order.payment_method
            ))
        })?;

        if order.transaction_id.as_str().is_empty() {
            return Err(PaymentError::Validation(
                "transaction id is required".to_string(),
            ));
        }
        if !order.customer.has_phone() {
            return Err(PaymentError::Validation(
                "customer phone is required".to_string(),
            ));
        }

        let tran_id = order.transaction_id.as_str();
        let customer = &order.customer;
        let text = |value: &Option<String>| value.as_deref().unwrap_or("").trim().to_string();

        let mut fields = GatewayFields::new();
        let mut set = |name: &str, value: String| {
            fields.insert(name.to_string(), value);
        };

        set(field::REQ_TIME, now.format(REQ_TIME_FORMAT).to_string());
        set(field::MERCHANT_ID, self.config.merchant_id.clone());
        set(field::TRAN_ID, tran_id.to_string());
        set(field::AMOUNT, to_fixed_2(order.amount));
        set(field::ITEMS, encode_items(order)?);
        set(field::SHIPPING, to_fixed_2(order.shipping_fee));
        set(field::FIRSTNAME, text(&customer.first_name));
        set(field::LASTNAME, text(&customer.last_name));
        set(field::EMAIL, text(&customer.email));
        set(field::PHONE, customer.phone.trim().to_string());
        set(field::TYPE, TRANSACTION_TYPE_PURCHASE.to_string());
        set(field::PAYMENT_OPTION, payment_option.to_string());
        set(field::RETURN_URL, self.config.callback_url.clone());
        set(field::CANCEL_URL, self.config.cancel_url.clone());
        set(field::CONTINUE_SUCCESS_URL, self.config.success_url_for(tran_id));
        set(field::RETURN_DEEPLINK, String::new());
        set(field::CURRENCY, self.config.currency.clone());
        set(field::CUSTOM_FIELDS, String::new());
        set(field::RETURN_PARAMS, String::new());
        set(field::PAYOUT, String::new());
        set(
            field::LIFETIME,
            self.config
                .lifetime_minutes
                .map(|minutes| minutes.to_string())
                .unwrap_or_default(),
        );
        set(field::ADDITIONAL_PARAMS, String::new());
        set(field::GOOGLE_PAY_TOKEN, String::new());
        set(field::PAYMENT_GATE, String::new());

        let hash = compute_integrity_hash(&fields, &self.config.api_key);
        fields.insert(field::HASH.to_string(), hash);

        tracing::info!(
            tran_id = %tran_id,
            amount = %order.amount,
            payment_option = payment_option,
            "Built gateway transaction request"
        );

        Ok(TransactionRequest {
            endpoint: self.config.purchase_endpoint(),
            payload: fields,
        })
    }
}

/// base64(JSON([{name, quantity, price}]))
fn encode_items(order: &Order) -> PaymentResult<String> {
    let items: Vec<GatewayItem> = order
        .items
        .iter()
        .map(|item| GatewayItem {
            name: item.display_name().to_string(),
            quantity: item.quantity,
            price: item.unit_price,
        })
        .collect();

    let json = serde_json::to_string(&items)?;
    Ok(platform::crypto::to_base64(json.as_bytes()))
}

/// Decode the `items` field back into line items
pub fn decode_items(encoded: &str) -> PaymentResult<Vec<GatewayItem>> {
    let bytes = platform::crypto::from_base64(encoded)
        .map_err(|e| PaymentError::Validation(format!("items field is not base64: {}", e)))?;
    Ok(serde_json::from_slice(&bytes)?)
}
