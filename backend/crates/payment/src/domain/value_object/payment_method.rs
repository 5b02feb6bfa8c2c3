//! Payment Method Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the customer pays for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Bank app QR payment through the hosted gateway page
    #[serde(rename = "abapay_khqr", alias = "bank_qr")]
    BankQrPay,
    /// Card payment through the hosted gateway page
    #[serde(rename = "cards", alias = "card")]
    CardPay,
    /// Paid to the courier; never goes through the gateway
    #[serde(rename = "cod", alias = "cash_on_delivery")]
    CashOnDelivery,
}

impl PaymentMethod {
    /// Get string code for storage/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BankQrPay => "abapay_khqr",
            Self::CardPay => "cards",
            Self::CashOnDelivery => "cod",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "abapay_khqr" => Some(Self::BankQrPay),
            "cards" => Some(Self::CardPay),
            "cod" => Some(Self::CashOnDelivery),
            _ => None,
        }
    }

    /// The gateway's `payment_option` token, `None` for cash on delivery
    #[inline]
    pub const fn gateway_option(&self) -> Option<&'static str> {
        match self {
            Self::BankQrPay => Some("abapay_khqr"),
            Self::CardPay => Some("cards"),
            Self::CashOnDelivery => None,
        }
    }

    #[inline]
    pub const fn uses_gateway(&self) -> bool {
        self.gateway_option().is_some()
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_option() {
        assert_eq!(PaymentMethod::BankQrPay.gateway_option(), Some("abapay_khqr"));
        assert_eq!(PaymentMethod::CardPay.gateway_option(), Some("cards"));
        assert_eq!(PaymentMethod::CashOnDelivery.gateway_option(), None);
        assert!(!PaymentMethod::CashOnDelivery.uses_gateway());
    }

    #[test]
    fn test_deserialize_with_aliases() {
        let method: PaymentMethod = serde_json::from_str(r#""cards""#).unwrap();
        assert_eq!(method, PaymentMethod::CardPay);

        let method: PaymentMethod = serde_json::from_str(r#""cash_on_delivery""#).unwrap();
        assert_eq!(method, PaymentMethod::CashOnDelivery);

        assert!(serde_json::from_str::<PaymentMethod>(r#""bitcoin""#).is_err());
    }

    #[test]
    fn test_from_code() {
        for method in [
            PaymentMethod::BankQrPay,
            PaymentMethod::CardPay,
            PaymentMethod::CashOnDelivery,
        ] {
            assert_eq!(PaymentMethod::from_code(method.code()), Some(method));
        }
    }
}
