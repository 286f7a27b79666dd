//! Pool-ratio arithmetic for proportional deposits and withdrawals.
//!
//! A constant-product pool prices deposits by its current reserves: adding
//! ether without disturbing the price requires a token amount that keeps
//! `token_reserve / ether_reserve` unchanged. All arithmetic here is exact
//! integer math over [`BigUint`], truncating towards zero on division.

use num_bigint::BigUint;
use num_traits::Zero;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RatioError {
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),
}

/// Computes the token deposit that keeps the pool ratio constant when
/// `ether_to_add` wei of ether is added.
///
/// Returns `floor(ether_to_add * token_reserve / ether_reserve)`.
///
/// Fails on an empty ether reserve: the first depositor into an empty pool
/// chooses both amounts freely and there is no ratio to preserve.
pub fn proportional_token_deposit(
    ether_to_add: &BigUint,
    ether_reserve: &BigUint,
    token_reserve: &BigUint,
) -> Result<BigUint, RatioError> {
    if ether_reserve.is_zero() {
        return Err(RatioError::DivisionByZero("ether reserve is empty"));
    }
    Ok(ether_to_add * token_reserve / ether_reserve)
}

/// Computes the `(ether, token)` amounts paid out for burning `lp_burned`
/// LP tokens against the current reserves.
///
/// Each side pays `floor(reserve * lp_burned / lp_total_supply)`.
pub fn withdrawal_amounts(
    lp_burned: &BigUint,
    lp_total_supply: &BigUint,
    ether_reserve: &BigUint,
    token_reserve: &BigUint,
) -> Result<(BigUint, BigUint), RatioError> {
    if lp_total_supply.is_zero() {
        return Err(RatioError::DivisionByZero("LP token supply is zero"));
    }
    let ether_out = ether_reserve * lp_burned / lp_total_supply;
    let token_out = token_reserve * lp_burned / lp_total_supply;
    Ok((ether_out, token_out))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn big(n: u128) -> BigUint {
        BigUint::from(n)
    }

    #[rstest]
    #[case::even_ratio(1, 10, 100, 10)]
    #[case::truncating(3, 7, 50, 21)] // floor(150 / 7)
    #[case::zero_deposit(0, 10, 100, 0)]
    #[case::empty_token_side(5, 10, 0, 0)]
    #[case::whole_reserve(10, 10, 100, 100)]
    fn test_proportional_token_deposit(
        #[case] ether_to_add: u128,
        #[case] ether_reserve: u128,
        #[case] token_reserve: u128,
        #[case] expected: u128,
    ) {
        let result =
            proportional_token_deposit(&big(ether_to_add), &big(ether_reserve), &big(token_reserve))
                .unwrap();
        assert_eq!(result, big(expected));
    }

    #[test]
    fn test_proportional_token_deposit_empty_pool() {
        let result = proportional_token_deposit(&big(1), &big(0), &big(100));
        assert_eq!(result, Err(RatioError::DivisionByZero("ether reserve is empty")));
    }

    #[test]
    fn test_proportional_token_deposit_never_exceeds_reserve() {
        // For any deposit not larger than the ether reserve, the quoted
        // token amount stays within the token reserve.
        let ether_reserve = big(7_919);
        let token_reserve = big(104_729);
        for ether_to_add in [0u128, 1, 500, 7_918, 7_919] {
            let quoted =
                proportional_token_deposit(&big(ether_to_add), &ether_reserve, &token_reserve)
                    .unwrap();
            assert!(quoted <= token_reserve);
        }
    }

    #[test]
    fn test_proportional_token_deposit_exceeds_word_size() {
        // Amounts are unbounded integers; nothing truncates at 2^256.
        let huge = BigUint::from(1u8) << 300;
        let result = proportional_token_deposit(&huge, &big(1), &big(2)).unwrap();
        assert_eq!(result, BigUint::from(2u8) << 300);
    }

    #[rstest]
    #[case::half_position(50, 100, 10, 200, 5, 100)]
    #[case::full_position(100, 100, 10, 200, 10, 200)]
    #[case::truncating(1, 3, 10, 20, 3, 6)]
    fn test_withdrawal_amounts(
        #[case] lp_burned: u128,
        #[case] lp_total_supply: u128,
        #[case] ether_reserve: u128,
        #[case] token_reserve: u128,
        #[case] expected_ether: u128,
        #[case] expected_token: u128,
    ) {
        let (ether_out, token_out) = withdrawal_amounts(
            &big(lp_burned),
            &big(lp_total_supply),
            &big(ether_reserve),
            &big(token_reserve),
        )
        .unwrap();
        assert_eq!(ether_out, big(expected_ether));
        assert_eq!(token_out, big(expected_token));
    }

    #[test]
    fn test_withdrawal_amounts_zero_supply() {
        let result = withdrawal_amounts(&big(1), &big(0), &big(10), &big(20));
        assert_eq!(result, Err(RatioError::DivisionByZero("LP token supply is zero")));
    }
}
