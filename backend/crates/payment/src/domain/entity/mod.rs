//! Entity Module

pub mod order;
pub mod transaction_request;
