//! Domain Layer
//!
//! This layer contains:
//! - Domain entities (Order, TransactionRequest)
//! - Value objects (TransactionId, PaymentMethod, PaymentStatus, DeliveryStatus)
//! - Domain services (canonical field ordering and integrity hash)
//! - Repository traits (interfaces)

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{order::Order, transaction_request::TransactionRequest};
pub use repository::OrderRepository;
