//! USDC amount conversions.

use crate::core::errors::TrackerError;
use crate::core::validation::{validate_amount_strict, USDC_DECIMALS};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a user-entered USDC amount into 6-decimal base units.
pub fn parse_usdc_amount(amount: &str) -> Result<u128, TrackerError> {
    let amount = amount.trim();
    validate_amount_strict(amount, USDC_DECIMALS)
        .map_err(|e| TrackerError::InvalidAmount(format!("{}: {}", amount, e)))?;
    let value = Decimal::from_str(amount)
        .map_err(|e| TrackerError::InvalidAmount(format!("{}: {}", amount, e)))?;
    value
        .checked_mul(Decimal::from(10u64.pow(USDC_DECIMALS as u32)))
        .and_then(|units| units.to_u128())
        .ok_or_else(|| TrackerError::InvalidAmount(format!("{}: out of range", amount)))
}

/// Render USDC base units as a decimal string without trailing zeros.
pub fn format_usdc(base_units: u128) -> Result<String, TrackerError> {
    let signed = i128::try_from(base_units)
        .map_err(|_| TrackerError::InvalidAmount(format!("{} exceeds i128", base_units)))?;
    let decimal = Decimal::try_from_i128_with_scale(signed, USDC_DECIMALS as u32)
        .map_err(|e| TrackerError::InvalidAmount(format!("{}: {}", base_units, e)))?;
    Ok(decimal.normalize().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1", 1_000_000 ; "whole")]
    #[test_case("0.5", 500_000 ; "fraction")]
    #[test_case("12.345678", 12_345_678 ; "six decimals")]
    #[test_case(" 3 ", 3_000_000 ; "trimmed")]
    fn parses_usdc(input: &str, expected: u128) {
        assert_eq!(parse_usdc_amount(input).unwrap(), expected);
    }

    #[test_case("0" ; "zero")]
    #[test_case("-1" ; "negative")]
    #[test_case("1.1234567" ; "too many decimals")]
    #[test_case("abc" ; "not a number")]
    fn rejects_bad_usdc(input: &str) {
        assert!(matches!(parse_usdc_amount(input), Err(TrackerError::InvalidAmount(_))));
    }

    #[test]
    fn formats_usdc_without_trailing_zeros() {
        assert_eq!(format_usdc(1_500_000).unwrap(), "1.5");
        assert_eq!(format_usdc(12_000_000).unwrap(), "12");
        assert_eq!(format_usdc(1).unwrap(), "0.000001");
    }
}
