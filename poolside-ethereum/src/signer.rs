use alloy::{primitives::TxHash, rpc::types::TransactionRequest};
use async_trait::async_trait;

use crate::errors::SubmitError;

/// The signing capability the caller brings.
///
/// Implementations own key management, gas and nonce handling, and the
/// actual broadcast; this crate only ever hands them a fully prepared call
/// request and never inspects them beyond this surface. Wallet failures
/// should be classified through [`SubmitError::from_error_payload`] where a
/// JSON-RPC error payload is available.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait TransactionSender: Send + Sync {
    /// Signs and broadcasts `request`, returning the transaction hash.
    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, SubmitError>;
}
