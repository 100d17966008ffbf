//! Monetary rounding.
//!
//! RULE: commissions are rounded half-up on the shortest decimal form of
//! the f64, never on its binary value. 2.675 rounds to 2.68 here, even
//! though the nearest f64 sits just below 2.675.

use crate::error::{CommissionError, CommissionResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Round `value` half-up to `places` fractional digits.
///
/// Midpoints move away from zero, which is half-up for the non-negative
/// amounts this engine produces.
pub fn round_half_up(value: f64, places: u32) -> CommissionResult<f64> {
    let rounding_error = || CommissionError::Rounding { value, places };

    if !value.is_finite() {
        return Err(rounding_error());
    }
    // Display yields the shortest string that round-trips to `value`.
    let exact = Decimal::from_str(&value.to_string()).map_err(|_| rounding_error())?;
    exact
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .ok_or_else(rounding_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoints_round_up_not_to_even() {
        assert_eq!(round_half_up(0.125, 2).unwrap(), 0.13);
        assert_eq!(round_half_up(0.375, 2).unwrap(), 0.38);
        assert_eq!(round_half_up(2.5, 0).unwrap(), 3.0);
    }

    #[test]
    fn rounds_the_decimal_form_not_the_binary_value() {
        // The f64 nearest 2.675 is 2.67499999..., binary rounding gives 2.67.
        assert_eq!(round_half_up(2.675, 2).unwrap(), 2.68);
        assert_eq!(round_half_up(1.005, 2).unwrap(), 1.01);
    }

    #[test]
    fn float_noise_is_absorbed() {
        assert_eq!(round_half_up(0.05 * 150.0, 2).unwrap(), 7.5);
        assert_eq!(round_half_up(7.500000000000001, 2).unwrap(), 7.5);
        assert_eq!(round_half_up(0.0, 2).unwrap(), 0.0);
    }

    #[test]
    fn below_midpoint_rounds_down() {
        assert_eq!(round_half_up(1.234, 2).unwrap(), 1.23);
        assert_eq!(round_half_up(1.2349999, 2).unwrap(), 1.23);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(matches!(
            round_half_up(f64::INFINITY, 2),
            Err(CommissionError::Rounding { .. })
        ));
        assert!(round_half_up(f64::NAN, 2).is_err());
    }
}
