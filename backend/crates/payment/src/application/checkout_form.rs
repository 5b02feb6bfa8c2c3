//! Checkout Form Use Case
//!
//! Renders the auto-submitting HTML form that hands the browser over to
//! the hosted payment page.

use std::fmt::Write;
use std::sync::Arc;

use crate::application::build_transaction::TransactionRequestBuilder;
use crate::application::config::PaywayConfig;
use crate::application::get_order::GetOrderUseCase;
use crate::domain::entity::transaction_request::TransactionRequest;
use crate::domain::repository::OrderRepository;
use crate::error::{PaymentError, PaymentResult};

/// Checkout Form Use Case
pub struct CheckoutFormUseCase<R>
where
    R: OrderRepository,
{
    order_repo: Arc<R>,
    config: Arc<PaywayConfig>,
}

impl<R> CheckoutFormUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(order_repo: Arc<R>, config: Arc<PaywayConfig>) -> Self {
        Self { order_repo, config }
    }

    /// Build a fresh request for a pending order and render it
    pub async fn execute(&self, tran_id: &str) -> PaymentResult<String> {
        let order = GetOrderUseCase::new(self.order_repo.clone())
            .execute(tran_id)
            .await?;

        if !order.payment_method.uses_gateway() {
            return Err(PaymentError::Validation(format!(
                "order {} is paid on delivery",
                order.transaction_id
            )));
        }
        if !order.awaits_payment() {
            return Err(PaymentError::StateConflict(format!(
                "order {} is already {}",
                order.transaction_id, order.payment_status
            )));
        }

        let request = TransactionRequestBuilder::new(self.config.clone()).build(&order)?;
        Ok(render_auto_submit_form(&request))
    }
}

/// HTML page with one hidden input per payload field, submitted on load
pub fn render_auto_submit_form(request: &TransactionRequest) -> String {
    let mut inputs = String::new();
    for (name, value) in &request.payload {
        // Writing to a String cannot fail
        let _ = writeln!(
            inputs,
            r#"      <input type="hidden" name="{}" value="{}">"#,
            escape_html(name),
            escape_html(value)
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
  <head><meta charset="utf-8"><title>Redirecting to payment</title></head>
  <body onload="document.forms['checkout'].submit()">
    <form id="checkout" name="checkout" method="POST" action="{action}">
{inputs}      <noscript><button type="submit">Continue to payment</button></noscript>
    </form>
  </body>
</html>
"#,
        action = escape_html(&request.endpoint),
        inputs = inputs,
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::GatewayFields;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"a&b<c>"d"'e"#),
            "a&amp;b&lt;c&gt;&quot;d&quot;&#x27;e"
        );
    }

    #[test]
    fn test_form_contains_every_field() {
        let mut payload = GatewayFields::new();
        payload.insert("tran_id".to_string(), "T1".to_string());
        payload.insert("continue_success_url".to_string(), "https://shop/ok?a=1&tran_id=T1".to_string());
        let request = TransactionRequest {
            endpoint: "https://gw/api/payment-gateway/v1/payments/purchase".to_string(),
            payload,
        };

        let html = render_auto_submit_form(&request);
        assert!(html.contains(r#"action="https://gw/api/payment-gateway/v1/payments/purchase""#));
        assert!(html.contains(r#"name="tran_id" value="T1""#));
        assert!(html.contains("https://shop/ok?a=1&amp;tran_id=T1"));
        assert_eq!(html.matches(r#"type="hidden""#).count(), 2);
    }
}
