//! Payment Error Types
//!
//! This module provides payment-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Payment-specific result type alias
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Payment-specific error variants
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Required gateway configuration is missing or malformed
    #[error("Payment configuration error: {0}")]
    Configuration(String),

    /// Order input rejected before a transaction request could be built
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Callback status code is not in the gateway status table
    #[error("Invalid payment status: {0}")]
    InvalidStatus(String),

    /// No order carries the given transaction id
    #[error("Order not found for transaction {0}")]
    OrderNotFound(String),

    /// An order with the same transaction id already exists
    #[error("Transaction id already in use: {0}")]
    DuplicateTransaction(String),

    /// Order is not in a state that allows the requested action
    #[error("Order state conflict: {0}")]
    StateConflict(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON encoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::Validation(_) => ErrorKind::BadRequest,
            PaymentError::OrderNotFound(_) => ErrorKind::NotFound,
            PaymentError::DuplicateTransaction(_) | PaymentError::StateConflict(_) => {
                ErrorKind::Conflict
            }
            PaymentError::InvalidStatus(_) => ErrorKind::UnprocessableEntity,
            PaymentError::Database(e) => database_kind(e),
            PaymentError::Configuration(_)
            | PaymentError::Serialization(_)
            | PaymentError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Short machine-readable reason, used in callback acknowledgements
    pub fn reason(&self) -> &'static str {
        match self {
            PaymentError::Configuration(_) => "configuration_error",
            PaymentError::Validation(_) => "validation_error",
            PaymentError::InvalidStatus(_) => "invalid_status",
            PaymentError::OrderNotFound(_) => "order_not_found",
            PaymentError::DuplicateTransaction(_) => "duplicate_transaction",
            PaymentError::StateConflict(_) => "state_conflict",
            PaymentError::Database(_) => "database_error",
            PaymentError::Serialization(_) => "serialization_error",
            PaymentError::Internal(_) => "internal_error",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            PaymentError::Database(e) => {
                tracing::error!(error = %e, "Payment database error");
            }
            PaymentError::Configuration(msg) => {
                tracing::error!(message = %msg, "Payment configuration error");
            }
            PaymentError::Internal(msg) => {
                tracing::error!(message = %msg, "Payment internal error");
            }
            PaymentError::InvalidStatus(_) | PaymentError::OrderNotFound(_) => {
                tracing::warn!(error = %self, "Payment reconciliation failed");
            }
            _ => {
                tracing::debug!(error = %self, "Payment error");
            }
        }
    }
}

fn database_kind(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => ErrorKind::ServiceUnavailable,
        _ => ErrorKind::InternalServerError,
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Database(e) => AppError::from(e),
            PaymentError::Serialization(e) => {
                AppError::internal("Failed to encode payment data").with_source(e)
            }
            other => other.to_app_error(),
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
