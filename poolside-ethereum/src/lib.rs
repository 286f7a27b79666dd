#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod client;
pub mod contracts;
pub mod erc20;
pub mod errors;
pub mod exchange;
pub mod finality;
pub mod rpc;
pub mod signer;

use alloy::primitives::U256;
use num_bigint::BigUint;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("amount {value} does not fit into a 256-bit word")]
pub struct AmountOverflow {
    pub value: BigUint,
}

/// A trait for converting amounts between the unbounded `BigUint`
/// representation used by `poolside-common` and the fixed-width words the
/// chain works in.
///
/// # Examples
/// ```
/// use alloy::primitives::U256;
/// use num_bigint::BigUint;
/// use poolside_ethereum::AmountCodec;
///
/// let wei = U256::from(1_000_000_000u64);
/// let unbounded: BigUint = wei.to_biguint();
/// assert_eq!(U256::from_biguint(&unbounded), Ok(wei));
/// ```
pub trait AmountCodec: Sized {
    /// Converts the on-chain word into an unbounded integer.
    fn to_biguint(self) -> BigUint;

    /// Converts an unbounded integer back into an on-chain word.
    ///
    /// Fails with [`AmountOverflow`] if `value` needs more than 256 bits.
    fn from_biguint(value: &BigUint) -> Result<Self, AmountOverflow>;
}

impl AmountCodec for U256 {
    fn to_biguint(self) -> BigUint {
        BigUint::from_bytes_be(&self.to_be_bytes::<32>())
    }

    fn from_biguint(value: &BigUint) -> Result<Self, AmountOverflow> {
        let bytes = value.to_bytes_be();
        if bytes.len() > 32 {
            return Err(AmountOverflow { value: value.clone() });
        }

        let mut u256_bytes: [u8; 32] = [0; 32];
        u256_bytes[32 - bytes.len()..].copy_from_slice(&bytes);
        Ok(U256::from_be_bytes(u256_bytes))
    }
}
