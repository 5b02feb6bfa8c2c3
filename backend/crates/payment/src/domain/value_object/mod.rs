//! Value Object Module

pub mod delivery_status;
pub mod money;
pub mod payment_method;
pub mod payment_status;
pub mod transaction_id;
