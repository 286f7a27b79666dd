use std::time::Duration;

use alloy::{
    primitives::TxHash,
    transports::{RpcError as TransportError, TransportErrorKind},
};
use poolside_common::ratio::RatioError;
use thiserror::Error;

use crate::AmountOverflow;

/// Read-side RPC failures.
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("RPC setup error: {0}")]
    Setup(String),
    #[error("request error: {0}")]
    Request(#[from] TransportError<TransportErrorKind>),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Why a transaction submission failed.
///
/// Wallets and nodes report failures as JSON-RPC error payloads;
/// [`SubmitError::from_error_payload`] maps the common codes onto this
/// taxonomy so callers can branch on the failure kind instead of parsing
/// provider-specific strings.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("signer rejected the transaction: {0}")]
    Rejected(String),
    #[error("insufficient balance: {0}")]
    InsufficientFunds(String),
    #[error("execution reverted: {0}")]
    Reverted(String),
    #[error("network error: {0}")]
    Network(String),
}

impl SubmitError {
    /// Classifies a JSON-RPC error payload into the submission failure it
    /// represents.
    ///
    /// Codes 4001/4100 are the EIP-1193 user-rejection and unauthorized
    /// responses; code 3 is the standard execution-revert response. The
    /// message fallbacks cover providers that report insufficient funds or
    /// reverts under the generic -32000 server error.
    pub fn from_error_payload(code: i64, message: &str) -> Self {
        let lowered = message.to_ascii_lowercase();
        match code {
            4001 | 4100 => Self::Rejected(message.to_string()),
            3 => Self::Reverted(message.to_string()),
            _ if lowered.contains("insufficient funds") => {
                Self::InsufficientFunds(message.to_string())
            }
            _ if lowered.contains("revert") => Self::Reverted(message.to_string()),
            _ => Self::Network(format!("code {code}: {message}")),
        }
    }
}

/// Failures while waiting for a broadcast transaction to become final.
#[derive(Error, Debug)]
pub enum FinalityError {
    #[error("transaction {hash} reverted on-chain")]
    Reverted { hash: TxHash },
    #[error("transaction {hash} not final after {waited:?}")]
    Timeout { hash: TxHash, waited: Duration },
    #[error("failed to fetch receipt: {0}")]
    Receipt(#[from] RpcError),
}

/// A failure within one step of a liquidity operation: either the
/// submission itself or the wait for its finality.
#[derive(Error, Debug)]
pub enum StageError {
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error(transparent)]
    Finality(#[from] FinalityError),
}

/// A failed liquidity operation, tagged with the step that failed.
///
/// The approve/deposit sequence is not atomic: `Deposit` after a final
/// approval means the allowance is granted on-chain but nothing was
/// deposited, and the caller decides whether to re-submit the deposit or
/// revoke the allowance.
#[derive(Error, Debug)]
pub enum LiquidityError {
    #[error("token approval failed: {0}")]
    Approval(#[source] StageError),
    #[error("liquidity deposit failed: {0}")]
    Deposit(#[source] StageError),
    #[error("liquidity withdrawal failed: {0}")]
    Withdrawal(#[source] StageError),
}

/// Failures while quoting a proportional deposit from live reserves.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error(transparent)]
    Ratio(#[from] RatioError),
    #[error(transparent)]
    Overflow(#[from] AmountOverflow),
}
