//! Infrastructure Layer
//!
//! Order repository implementations.

pub mod memory;
pub mod postgres;
