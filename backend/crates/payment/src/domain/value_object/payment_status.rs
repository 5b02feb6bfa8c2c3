//! Payment Status Value Objects
//!
//! The domain payment status of an order plus the gateway's numeric
//! status codes that callbacks carry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gateway status code → domain status. Codes outside this table are rejected.
pub const GATEWAY_STATUS_TABLE: [(i64, PaymentStatus); 5] = [
    (0, PaymentStatus::Approved),
    (2, PaymentStatus::Pending),
    (3, PaymentStatus::Declined),
    (4, PaymentStatus::Refunded),
    (7, PaymentStatus::Cancelled),
];

/// Payment status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting the gateway result (initial state)
    #[default]
    Pending,
    Approved,
    Declined,
    Refunded,
    Cancelled,
}

impl PaymentStatus {
    /// Get string code for storage/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Declined => "declined",
            Self::Refunded => "refunded",
            Self::Cancelled => "cancelled",
        }
    }

    /// Create from string code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "declined" => Some(Self::Declined),
            "refunded" => Some(Self::Refunded),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Look up the domain status for a gateway status code
    pub fn from_gateway_code(code: i64) -> Option<Self> {
        GATEWAY_STATUS_TABLE
            .iter()
            .find(|(gateway_code, _)| *gateway_code == code)
            .map(|(_, status)| *status)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raw `status` value from a gateway callback.
///
/// The gateway sends a number, but string-encoded numbers are seen too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GatewayStatusCode {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl GatewayStatusCode {
    /// Coerce to an integer code.
    ///
    /// Blank strings and non-integral numbers do not coerce.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(code) => Some(*code),
            Self::Float(value) => {
                if value.is_finite() && value.fract() == 0.0 {
                    Some(*value as i64)
                } else {
                    None
                }
            }
            Self::Text(text) => text.trim().parse::<i64>().ok(),
        }
    }

    /// Map to the domain payment status via [`GATEWAY_STATUS_TABLE`]
    pub fn to_payment_status(&self) -> Option<PaymentStatus> {
        self.as_integer().and_then(PaymentStatus::from_gateway_code)
    }
}

impl fmt::Display for GatewayStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(code) => write!(f, "{}", code),
            Self::Float(value) => write!(f, "{}", value),
            Self::Text(text) => write!(f, "{:?}", text),
        }
    }
}

impl From<i64> for GatewayStatusCode {
    fn from(code: i64) -> Self {
        Self::Integer(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_table() {
        assert_eq!(PaymentStatus::from_gateway_code(0), Some(PaymentStatus::Approved));
        assert_eq!(PaymentStatus::from_gateway_code(2), Some(PaymentStatus::Pending));
        assert_eq!(PaymentStatus::from_gateway_code(3), Some(PaymentStatus::Declined));
        assert_eq!(PaymentStatus::from_gateway_code(4), Some(PaymentStatus::Refunded));
        assert_eq!(PaymentStatus::from_gateway_code(7), Some(PaymentStatus::Cancelled));

        for unmapped in [-1, 1, 5, 6, 8, 100] {
            assert_eq!(PaymentStatus::from_gateway_code(unmapped), None);
        }
    }

    #[test]
    fn test_code_roundtrip() {
        for (_, status) in GATEWAY_STATUS_TABLE {
            assert_eq!(PaymentStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(PaymentStatus::from_code("paid"), None);
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }

    #[test]
    fn test_status_code_coercion() {
        assert_eq!(GatewayStatusCode::Integer(3).as_integer(), Some(3));
        assert_eq!(GatewayStatusCode::Float(4.0).as_integer(), Some(4));
        assert_eq!(GatewayStatusCode::Float(4.5).as_integer(), None);
        assert_eq!(GatewayStatusCode::Text(" 7 ".into()).as_integer(), Some(7));
        assert_eq!(GatewayStatusCode::Text("".into()).as_integer(), None);
        assert_eq!(GatewayStatusCode::Text("approved".into()).as_integer(), None);
    }

    #[test]
    fn test_status_code_deserialization() {
        let code: GatewayStatusCode = serde_json::from_str("0").unwrap();
        assert_eq!(code, GatewayStatusCode::Integer(0));

        let code: GatewayStatusCode = serde_json::from_str(r#""0""#).unwrap();
        assert_eq!(code.to_payment_status(), Some(PaymentStatus::Approved));
    }
}
