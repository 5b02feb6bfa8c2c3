//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod build_transaction;
pub mod checkout_form;
pub mod config;
pub mod create_order;
pub mod get_order;
pub mod reconcile_callback;

// Re-exports
pub use build_transaction::TransactionRequestBuilder;
pub use checkout_form::CheckoutFormUseCase;
pub use config::PaywayConfig;
pub use create_order::{CreateOrderInput, CreateOrderOutput, CreateOrderUseCase};
pub use get_order::GetOrderUseCase;
pub use reconcile_callback::{
    ReconcileCallbackInput, ReconcileCallbackOutput, ReconcileCallbackUseCase,
};
