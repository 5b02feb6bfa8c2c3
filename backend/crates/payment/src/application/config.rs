//! Application Configuration
//!
//! Payment gateway settings, built once at startup and shared by reference.

use platform::crypto::SecretKey;

use crate::error::{PaymentError, PaymentResult};

/// Path of the hosted purchase endpoint under the gateway base URL
pub const PURCHASE_PATH: &str = "/api/payment-gateway/v1/payments/purchase";

pub const DEFAULT_CURRENCY: &str = "USD";

/// Environment variable names
pub mod env {
    pub const MERCHANT_ID: &str = "PAYWAY_MERCHANT_ID";
    pub const API_KEY: &str = "PAYWAY_API_KEY";
    pub const BASE_URL: &str = "PAYWAY_BASE_URL";
    pub const CALLBACK_URL: &str = "PAYWAY_CALLBACK_URL";
    pub const SUCCESS_URL: &str = "PAYWAY_SUCCESS_URL";
    pub const CANCEL_URL: &str = "PAYWAY_CANCEL_URL";
    pub const CURRENCY: &str = "PAYWAY_CURRENCY";
    pub const LIFETIME_MINUTES: &str = "PAYWAY_LIFETIME_MINUTES";
}

/// Payment gateway configuration
#[derive(Debug, Clone)]
pub struct PaywayConfig {
    /// Merchant identifier issued by the gateway
    pub merchant_id: String,
    /// Shared secret used for the request hash
    pub api_key: SecretKey,
    /// Gateway base URL, without trailing slash
    pub base_url: String,
    /// Server-to-server callback URL (`return_url`)
    pub callback_url: String,
    /// Browser redirect after a successful payment (`continue_success_url`)
    pub success_url: String,
    /// Browser redirect when the customer cancels (`cancel_url`)
    pub cancel_url: String,
    pub currency: String,
    /// Payment session lifetime; gateway default when unset
    pub lifetime_minutes: Option<u32>,
}

impl PaywayConfig {
    /// Load from process environment
    pub fn from_env() -> PaymentResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary lookup (tests inject fake environments)
    pub fn from_lookup<F>(lookup: F) -> PaymentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |name: &str| {
            optional(name).ok_or_else(|| {
                PaymentError::Configuration(format!("{} must be set", name))
            })
        };

        // Whitespace is part of the secret
        let api_key = lookup(env::API_KEY)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                PaymentError::Configuration(format!("{} must be set", env::API_KEY))
            })?;

        let lifetime_minutes = optional(env::LIFETIME_MINUTES)
            .map(|value| {
                value.parse::<u32>().map_err(|_| {
                    PaymentError::Configuration(format!(
                        "{} must be a whole number of minutes",
                        env::LIFETIME_MINUTES
                    ))
                })
            })
            .transpose()?;

        let config = Self {
            merchant_id: required(env::MERCHANT_ID)?,
            api_key: SecretKey::from(api_key.as_str()),
            base_url: required(env::BASE_URL)?.trim_end_matches('/').to_string(),
            callback_url: required(env::CALLBACK_URL)?,
            success_url: required(env::SUCCESS_URL)?,
            cancel_url: required(env::CANCEL_URL)?,
            currency: optional(env::CURRENCY).unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            lifetime_minutes,
        };

        tracing::info!(
            merchant_id = %config.merchant_id,
            base_url = %config.base_url,
            currency = %config.currency,
            "Loaded payment gateway configuration"
        );

        Ok(config)
    }

    /// Full purchase endpoint URL
    pub fn purchase_endpoint(&self) -> String {
        format!("{}{}", self.base_url, PURCHASE_PATH)
    }

    /// Success URL carrying the transaction id so the returning browser
    /// can be matched to its order
    pub fn success_url_for(&self, transaction_id: &str) -> String {
        let separator = if self.success_url.contains('?') { '&' } else { '?' };
        format!("{}{}tran_id={}", self.success_url, separator, transaction_id)
    }

    /// Config for tests and local development against the sandbox
    pub fn sandbox(merchant_id: &str, api_key: &str) -> Self {
        Self {
            merchant_id: merchant_id.to_string(),
            api_key: SecretKey::from(api_key),
            base_url: "https://checkout-sandbox.payway.com.kh".to_string(),
            callback_url: "http://localhost:31113/payments/callback".to_string(),
            success_url: "http://localhost:40922/checkout/success".to_string(),
            cancel_url: "http://localhost:40922/checkout/cancel".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            lifetime_minutes: None,
        }
    }
}
