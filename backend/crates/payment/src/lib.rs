//! Payment Backend Module
//!
//! Hosted payment page checkout and gateway callback reconciliation.
//!
//! Clean Architecture structure:
//! - `domain/` - Order entity, value objects, integrity hash, repository traits
//! - `application/` - Use cases and gateway configuration
//! - `infra/` - PostgreSQL and in-memory order stores
//! - `presentation/` - HTTP handlers
//!
//! ## Flow
//! - `POST /orders` persists a pending order and returns the signed gateway form
//! - The browser posts that form to the gateway
//! - The gateway calls `POST /payments/callback`, which maps the status code
//!   and updates the order; the gateway always receives 200

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::PaywayConfig;
pub use error::{PaymentError, PaymentResult};
pub use infra::memory::InMemoryOrderRepository;
pub use infra::postgres::PgOrderRepository;
pub use presentation::router::{payment_router, payment_router_generic};
