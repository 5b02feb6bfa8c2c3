//! Transaction Id Value Object
//!
//! Correlates a local order with its gateway transaction (`tran_id`).

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{PaymentError, PaymentResult};

/// Longest `tran_id` the gateway accepts
pub const TRANSACTION_ID_MAX_LENGTH: usize = 20;

/// Gateway transaction id, immutable once assigned to an order
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionId(String);

impl TransactionId {
    /// Create with validation
    pub fn new(value: impl Into<String>) -> PaymentResult<Self> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(PaymentError::Validation(
                "transaction id is required".to_string(),
            ));
        }

        if value.len() > TRANSACTION_ID_MAX_LENGTH {
            return Err(PaymentError::Validation(format!(
                "transaction id must be at most {} characters",
                TRANSACTION_ID_MAX_LENGTH
            )));
        }

        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(PaymentError::Validation(
                "transaction id may only contain letters, digits, '-' and '_'".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// Generate a fresh random id of maximum length
    pub fn generate() -> Self {
        Self(platform::crypto::random_alphanumeric(
            TRANSACTION_ID_MAX_LENGTH,
        ))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TransactionId {
    type Err = PaymentError;

    fn from_str(s: &str) -> PaymentResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for TransactionId {
    type Error = PaymentError;

    fn try_from(value: String) -> PaymentResult<Self> {
        Self::new(value)
    }
}

impl From<TransactionId> for String {
    fn from(id: TransactionId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert_eq!(TransactionId::new("T1").unwrap().as_str(), "T1");
        assert_eq!(TransactionId::new("  ord-2024_01 ").unwrap().as_str(), "ord-2024_01");
    }

    #[test]
    fn test_invalid_ids() {
        assert!(matches!(
            TransactionId::new(""),
            Err(PaymentError::Validation(_))
        ));
        assert!(TransactionId::new("   ").is_err());
        assert!(TransactionId::new("a".repeat(21)).is_err());
        assert!(TransactionId::new("T1&x=1").is_err());
    }

    #[test]
    fn test_generate() {
        let id = TransactionId::generate();
        assert_eq!(id.as_str().len(), TRANSACTION_ID_MAX_LENGTH);
        assert!(TransactionId::new(id.as_str()).is_ok());
    }

    #[test]
    fn test_serde_validates() {
        let id: TransactionId = serde_json::from_str(r#""T1""#).unwrap();
        assert_eq!(id.to_string(), "T1");
        assert!(serde_json::from_str::<TransactionId>(r#""""#).is_err());
    }
}
