//! Deposit quotes.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::ratio::{proportional_token_deposit, RatioError};

/// A matched pair of deposit amounts that preserves the pool ratio.
///
/// Amounts are base units (wei on the ether side) and serialize as decimal
/// strings, since JSON numbers cannot carry 256-bit values.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityQuote {
    /// Ether to deposit, in wei.
    #[serde_as(as = "DisplayFromStr")]
    pub ether_deposit: BigUint,
    /// Tokens to deposit alongside, in the token's base unit.
    #[serde_as(as = "DisplayFromStr")]
    pub token_deposit: BigUint,
}

impl LiquidityQuote {
    /// Quotes the token deposit matching `ether_to_add` against the given
    /// reserves.
    pub fn from_reserves(
        ether_to_add: &BigUint,
        ether_reserve: &BigUint,
        token_reserve: &BigUint,
    ) -> Result<Self, RatioError> {
        let token_deposit =
            proportional_token_deposit(ether_to_add, ether_reserve, token_reserve)?;
        Ok(Self { ether_deposit: ether_to_add.clone(), token_deposit })
    }
}
