//! Money helpers
//!
//! Line subtotals are computed through `Decimal` and stored back as
//! `f64`, rounded to 2 decimal places, so `3 × 0.1` does not leak binary
//! float noise into persisted amounts.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// `price × qty`, computed in decimal space
pub fn line_subtotal(price_unit: f64, qty: f64) -> f64 {
    to_f64(to_decimal(price_unit) * to_decimal(qty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtotal_is_exact_for_decimal_inputs() {
        assert_eq!(line_subtotal(1.5, 2.0), 3.0);
        assert_eq!(line_subtotal(0.1, 3.0), 0.3);
        assert_eq!(line_subtotal(2.95, 3.0), 8.85);
    }
}
