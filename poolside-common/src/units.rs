//! Decimal-string to base-unit conversion.
//!
//! User-facing amounts arrive as decimal strings ("1.5" ether); the chain
//! works in indivisible base units (wei, or an ERC20's smallest unit).
//! Conversion is exact: anything that cannot be represented in the target
//! precision is an error, never a rounded value.

use num_bigint::BigUint;
use num_traits::Zero;
use thiserror::Error;

/// Ether carries 18 decimal places; one ether is 10^18 wei.
pub const ETHER_DECIMALS: u32 = 18;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitsError {
    #[error("invalid decimal amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: &'static str },
    #[error("{input:?} has {got} fractional digits, the unit only carries {max}")]
    PrecisionLoss { input: String, got: usize, max: u32 },
}

/// Parses a decimal ether string into wei.
pub fn parse_ether(input: &str) -> Result<BigUint, UnitsError> {
    parse_units(input, ETHER_DECIMALS)
}

/// Parses a decimal string into base units of a currency with `decimals`
/// decimal places.
pub fn parse_units(input: &str, decimals: u32) -> Result<BigUint, UnitsError> {
    let invalid = |reason| UnitsError::InvalidAmount { input: input.to_string(), reason };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty string"));
    }
    if trimmed.starts_with('-') {
        return Err(invalid("amounts cannot be negative"));
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (trimmed, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid("no digits"));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) ||
        !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid("unexpected character"));
    }
    if frac_part.len() > decimals as usize {
        return Err(UnitsError::PrecisionLoss {
            input: input.to_string(),
            got: frac_part.len(),
            max: decimals,
        });
    }

    let int_value = if int_part.is_empty() {
        BigUint::zero()
    } else {
        int_part
            .parse::<BigUint>()
            .map_err(|_| invalid("unexpected character"))?
    };
    let frac_value = if frac_part.is_empty() {
        BigUint::zero()
    } else {
        let parsed = frac_part
            .parse::<BigUint>()
            .map_err(|_| invalid("unexpected character"))?;
        parsed * BigUint::from(10u32).pow(decimals - frac_part.len() as u32)
    };

    Ok(int_value * BigUint::from(10u32).pow(decimals) + frac_value)
}

/// Renders a base-unit amount as a decimal string, trimming trailing zeros
/// from the fractional part.
pub fn format_units(value: &BigUint, decimals: u32) -> String {
    let scale = BigUint::from(10u32).pow(decimals);
    let int_part = value / &scale;
    let frac_part = value % &scale;
    if frac_part.is_zero() {
        return int_part.to_string();
    }
    let frac_str = format!("{:0>width$}", frac_part.to_string(), width = decimals as usize);
    format!("{int_part}.{}", frac_str.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::whole("1", "1000000000000000000")]
    #[case::fractional("0.5", "500000000000000000")]
    #[case::no_leading_zero(".25", "250000000000000000")]
    #[case::trailing_dot("2.", "2000000000000000000")]
    #[case::full_precision("1.000000000000000001", "1000000000000000001")]
    #[case::one_wei("0.000000000000000001", "1")]
    #[case::zero("0", "0")]
    #[case::surrounding_whitespace(" 3.5 ", "3500000000000000000")]
    fn test_parse_ether(#[case] input: &str, #[case] expected_wei: &str) {
        let expected = expected_wei.parse::<BigUint>().unwrap();
        assert_eq!(parse_ether(input).unwrap(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::only_dot(".")]
    #[case::negative("-1")]
    #[case::two_dots("1.2.3")]
    #[case::letters("abc")]
    #[case::exponent("1e18")]
    #[case::inner_whitespace("1 000")]
    #[case::explicit_sign("+1")]
    fn test_parse_ether_invalid(#[case] input: &str) {
        assert!(matches!(parse_ether(input), Err(UnitsError::InvalidAmount { .. })));
    }

    #[test]
    fn test_parse_ether_too_precise() {
        let input = "0.0000000000000000001"; // 19 fractional digits
        assert_eq!(
            parse_ether(input),
            Err(UnitsError::PrecisionLoss { input: input.to_string(), got: 19, max: 18 })
        );
    }

    #[rstest]
    #[case::six_decimals("1.5", 6, 1_500_000u64)]
    #[case::zero_decimals("42", 0, 42u64)]
    fn test_parse_units(#[case] input: &str, #[case] decimals: u32, #[case] expected: u64) {
        assert_eq!(parse_units(input, decimals).unwrap(), BigUint::from(expected));
    }

    #[rstest]
    #[case::whole(1_000_000u64, "1")]
    #[case::trimmed(1_500_000u64, "1.5")]
    #[case::sub_unit(25u64, "0.000025")]
    #[case::zero(0u64, "0")]
    fn test_format_units(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(format_units(&BigUint::from(value), 6), expected);
    }

    #[test]
    fn test_parse_format_agree() {
        let wei = parse_ether("12.000340000000000001").unwrap();
        assert_eq!(format_units(&wei, ETHER_DECIMALS), "12.000340000000000001");
    }
}
