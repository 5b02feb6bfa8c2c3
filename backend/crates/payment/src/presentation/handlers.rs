//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse};

use crate::application::checkout_form::CheckoutFormUseCase;
use crate::application::config::PaywayConfig;
use crate::application::create_order::CreateOrderUseCase;
use crate::application::get_order::GetOrderUseCase;
use crate::application::reconcile_callback::{
    ReconcileCallbackInput, ReconcileCallbackOutput, ReconcileCallbackUseCase,
};
use crate::domain::repository::OrderRepository;
use crate::error::{PaymentError, PaymentResult};
use crate::presentation::dto::{
    CallbackAck, CallbackRequest, CreateOrderRequest, CreateOrderResponse, OrderResponse,
};

/// Shared state for payment handlers
#[derive(Clone)]
pub struct PaymentAppState<R>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<PaywayConfig>,
}

/// POST /orders
pub async fn create_order<R>(
    State(state): State<PaymentAppState<R>>,
    Json(req): Json<CreateOrderRequest>,
) -> PaymentResult<impl IntoResponse>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateOrderUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case.execute(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse::from(output)),
    ))
}

/// GET /orders/{tran_id}
pub async fn get_order<R>(
    State(state): State<PaymentAppState<R>>,
    Path(tran_id): Path<String>,
) -> PaymentResult<Json<OrderResponse>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetOrderUseCase::new(state.repo.clone());

    let order = use_case.execute(&tran_id).await?;

    Ok(Json(order.into()))
}

/// GET /orders/{tran_id}/checkout
pub async fn checkout_form<R>(
    State(state): State<PaymentAppState<R>>,
    Path(tran_id): Path<String>,
) -> PaymentResult<Html<String>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let use_case = CheckoutFormUseCase::new(state.repo.clone(), state.config.clone());

    let page = use_case.execute(&tran_id).await?;

    Ok(Html(page))
}

/// POST /payments/callback
///
/// Always 200 once the body is read; the gateway retries anything else.
/// Accepts JSON or form-encoded bodies.
pub async fn payment_callback<R>(
    State(state): State<PaymentAppState<R>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<CallbackAck>)
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let ack = match reconcile(&state, content_type, &body).await {
        Ok(output) => CallbackAck::reconciled(&output),
        Err(err) => {
            err.log();
            CallbackAck::rejected(&err)
        }
    };

    (StatusCode::OK, Json(ack))
}

async fn reconcile<R>(
    state: &PaymentAppState<R>,
    content_type: Option<&str>,
    body: &[u8],
) -> PaymentResult<ReconcileCallbackOutput>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let request = CallbackRequest::parse(content_type, body).ok_or_else(|| {
        PaymentError::InvalidStatus("unreadable callback body".to_string())
    })?;
    let input = ReconcileCallbackInput::try_from(request)?;

    ReconcileCallbackUseCase::new(state.repo.clone())
        .execute(input)
        .await
}
