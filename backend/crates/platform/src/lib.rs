//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Message authentication (HMAC-SHA512) and Base64 encoding
//! - Constant-time comparison
//! - Secret key handling (zeroized on drop, redacted in logs)
//! - Random token generation

pub mod crypto;
