//! Domain Services
//!
//! Canonical field ordering and the request integrity hash.
//!
//! The gateway recomputes the hash from the submitted fields, so the field
//! order, the key names and the empty-string rule below must match its
//! implementation byte for byte.

use std::collections::BTreeMap;

use platform::crypto::{SecretKey, constant_time_eq, hmac_sha512, to_base64};

/// Gateway field name → value
pub type GatewayFields = BTreeMap<String, String>;

/// Gateway field names
pub mod field {
    pub const REQ_TIME: &str = "req_time";
    pub const MERCHANT_ID: &str = "merchant_id";
    pub const TRAN_ID: &str = "tran_id";
    pub const AMOUNT: &str = "amount";
    pub const ITEMS: &str = "items";
    pub const SHIPPING: &str = "shipping";
    pub const FIRSTNAME: &str = "firstname";
    pub const LASTNAME: &str = "lastname";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const TYPE: &str = "type";
    pub const PAYMENT_OPTION: &str = "payment_option";
    pub const RETURN_URL: &str = "return_url";
    pub const CANCEL_URL: &str = "cancel_url";
    pub const CONTINUE_SUCCESS_URL: &str = "continue_success_url";
    pub const RETURN_DEEPLINK: &str = "return_deeplink";
    pub const CURRENCY: &str = "currency";
    pub const CUSTOM_FIELDS: &str = "custom_fields";
    pub const RETURN_PARAMS: &str = "return_params";
    pub const PAYOUT: &str = "payout";
    pub const LIFETIME: &str = "lifetime";
    pub const ADDITIONAL_PARAMS: &str = "additional_params";
    pub const GOOGLE_PAY_TOKEN: &str = "google_pay_token";
    /// Sent with the request but not part of the hash
    pub const PAYMENT_GATE: &str = "payment_gate";
    pub const HASH: &str = "hash";
}

/// Order in which field values are concatenated before signing
pub const HASH_FIELD_ORDER: [&str; 23] = [
    field::REQ_TIME,
    field::MERCHANT_ID,
    field::TRAN_ID,
    field::AMOUNT,
    field::ITEMS,
    field::SHIPPING,
    field::FIRSTNAME,
    field::LASTNAME,
    field::EMAIL,
    field::PHONE,
    field::TYPE,
    field::PAYMENT_OPTION,
    field::RETURN_URL,
    field::CANCEL_URL,
    field::CONTINUE_SUCCESS_URL,
    field::RETURN_DEEPLINK,
    field::CURRENCY,
    field::CUSTOM_FIELDS,
    field::RETURN_PARAMS,
    field::PAYOUT,
    field::LIFETIME,
    field::ADDITIONAL_PARAMS,
    field::GOOGLE_PAY_TOKEN,
];

/// Concatenate field values in `order`; missing fields contribute ""
pub fn canonical_message(fields: &GatewayFields, order: &[&str]) -> String {
    order
        .iter()
        .map(|name| fields.get(*name).map(String::as_str).unwrap_or(""))
        .collect()
}

/// Base64(HMAC-SHA512(secret, values in `order`))
pub fn compute_hash_with_order(fields: &GatewayFields, order: &[&str], secret: &SecretKey) -> String {
    let message = canonical_message(fields, order);
    to_base64(&hmac_sha512(secret, message.as_bytes()))
}

/// Integrity hash over [`HASH_FIELD_ORDER`]
pub fn compute_integrity_hash(fields: &GatewayFields, secret: &SecretKey) -> String {
    compute_hash_with_order(fields, &HASH_FIELD_ORDER, secret)
}

/// Recompute the integrity hash and compare in constant time
pub fn verify_integrity_hash(fields: &GatewayFields, secret: &SecretKey, provided: &str) -> bool {
    let expected = compute_integrity_hash(fields, secret);
    constant_time_eq(expected.as_bytes(), provided.trim().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn secret() -> SecretKey {
        SecretKey::from("test-public-key")
    }

    fn sample_fields() -> GatewayFields {
        HASH_FIELD_ORDER
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), format!("v{}", i)))
            .collect()
    }

    #[test]
    fn test_hash_field_order_has_unique_keys() {
        let unique: HashSet<_> = HASH_FIELD_ORDER.iter().collect();
        assert_eq!(unique.len(), HASH_FIELD_ORDER.len());
        assert!(!HASH_FIELD_ORDER.contains(&field::PAYMENT_GATE));
        assert!(!HASH_FIELD_ORDER.contains(&field::HASH));
    }

    #[test]
    fn test_canonical_message_uses_empty_for_missing() {
        let mut fields = GatewayFields::new();
        fields.insert(field::TRAN_ID.to_string(), "T1".to_string());
        fields.insert(field::AMOUNT.to_string(), "11.00".to_string());
        assert_eq!(canonical_message(&fields, &HASH_FIELD_ORDER), "T111.00");
    }

    #[test]
    fn test_missing_and_empty_fields_hash_alike() {
        let mut with_empty = sample_fields();
        with_empty.insert(field::PAYOUT.to_string(), String::new());
        let mut without = sample_fields();
        without.remove(field::PAYOUT);
        assert_eq!(
            compute_integrity_hash(&with_empty, &secret()),
            compute_integrity_hash(&without, &secret())
        );
    }

    #[test]
    fn test_fields_outside_order_do_not_affect_hash() {
        let fields = sample_fields();
        let mut with_gate = fields.clone();
        with_gate.insert(field::PAYMENT_GATE.to_string(), "0".to_string());
        assert_eq!(
            compute_integrity_hash(&fields, &secret()),
            compute_integrity_hash(&with_gate, &secret())
        );
    }

    #[test]
    fn test_hash_matches_reference_vector() {
        // Reference computed independently with HMAC-SHA512 + standard base64
        let mut fields = GatewayFields::new();
        fields.insert(field::REQ_TIME.to_string(), "20240101000000".to_string());
        fields.insert(field::MERCHANT_ID.to_string(), "ec000002".to_string());
        fields.insert(field::TRAN_ID.to_string(), "T1".to_string());
        fields.insert(field::AMOUNT.to_string(), "11.00".to_string());
        let expected = to_base64(&hmac_sha512(
            &secret(),
            b"20240101000000ec000002T111.00",
        ));
        assert_eq!(compute_integrity_hash(&fields, &secret()), expected);
    }

    #[test]
    fn test_verify_integrity_hash() {
        let fields = sample_fields();
        let hash = compute_integrity_hash(&fields, &secret());
        assert!(verify_integrity_hash(&fields, &secret(), &hash));
        assert!(!verify_integrity_hash(&fields, &SecretKey::from("other"), &hash));

        let mut tampered = fields.clone();
        tampered.insert(field::AMOUNT.to_string(), "0.01".to_string());
        assert!(!verify_integrity_hash(&tampered, &secret(), &hash));
    }
}
