//! Delivery Status Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fulfilment progress of an order
///
/// Only the `Pending` → `Confirmed` promotion happens in this crate (on an
/// approved payment); the later stages belong to delivery management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl DeliveryStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "preparing" => Some(Self::Preparing),
            "out_for_delivery" => Some(Self::OutForDelivery),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(DeliveryStatus::from_code("pending"), Some(DeliveryStatus::Pending));
        assert_eq!(
            DeliveryStatus::from_code("out_for_delivery"),
            Some(DeliveryStatus::OutForDelivery)
        );
        assert_eq!(DeliveryStatus::from_code("shipped"), None);
    }

    #[test]
    fn test_serde_matches_code() {
        let json = serde_json::to_string(&DeliveryStatus::OutForDelivery).unwrap();
        assert_eq!(json, r#""out_for_delivery""#);
    }
}
