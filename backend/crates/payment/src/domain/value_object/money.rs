//! Money formatting
//!
//! The gateway takes amounts as fixed two-decimal strings ("19.50").

use rust_decimal::{Decimal, RoundingStrategy};

/// Largest amount a stored `NUMERIC(12, 2)` column holds
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Whether `value` lies in `0..=MAX_AMOUNT`
pub fn in_storable_range(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= MAX_AMOUNT
}

/// Format an amount with exactly two decimal places
pub fn to_fixed_2(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Round an amount to cents, as stored
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
