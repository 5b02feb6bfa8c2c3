//! Transaction Request
//!
//! Ephemeral gateway form submission: POST `payload` form-encoded to
//! `endpoint`. Never persisted.

use serde::Serialize;

use crate::domain::services::{GatewayFields, field};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRequest {
    pub endpoint: String,
    pub payload: GatewayFields,
}

impl TransactionRequest {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.payload.get(name).map(String::as_str)
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.field(field::TRAN_ID)
    }

    pub fn hash(&self) -> Option<&str> {
        self.field(field::HASH)
    }
}
