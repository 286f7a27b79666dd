use std::time::Duration;

use alloy::primitives::TxHash;
use async_trait::async_trait;
use tokio::time::{sleep, timeout};
use tracing::{debug, instrument};

use crate::{
    errors::FinalityError,
    rpc::{EthereumRpcClient, ReceiptSummary},
};

/// How long to wait for a submitted transaction to be mined, and how often
/// to poll for its receipt.
#[derive(Clone, Debug)]
pub struct FinalityConfig {
    /// Deadline for the whole wait (default: 120s)
    pub timeout: Duration,
    /// Delay between receipt polls (default: 7s)
    pub poll_interval: Duration,
}

impl FinalityConfig {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self { timeout, poll_interval }
    }
}

impl Default for FinalityConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(120), poll_interval: Duration::from_secs(7) }
    }
}

/// A broadcast transaction whose inclusion can be awaited.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait PendingTransaction: Send + Sync {
    fn hash(&self) -> TxHash;

    /// Suspends until the transaction is mined, then reports its execution
    /// status. Dropping this future abandons the wait only; the
    /// transaction itself stays broadcast.
    async fn await_finality(&self) -> Result<(), FinalityError>;
}

/// Receipt-polling finality tracker.
#[derive(Clone, Debug)]
pub struct EthPendingTransaction {
    hash: TxHash,
    rpc: EthereumRpcClient,
    config: FinalityConfig,
}

impl EthPendingTransaction {
    pub fn new(hash: TxHash, rpc: EthereumRpcClient, config: FinalityConfig) -> Self {
        Self { hash, rpc, config }
    }

    async fn poll_until_mined(&self) -> Result<ReceiptSummary, FinalityError> {
        loop {
            if let Some(receipt) = self
                .rpc
                .get_transaction_receipt(self.hash)
                .await?
            {
                if receipt.is_mined() {
                    return Ok(receipt);
                }
            }
            sleep(self.config.poll_interval).await;
        }
    }
}

#[async_trait]
impl PendingTransaction for EthPendingTransaction {
    fn hash(&self) -> TxHash {
        self.hash
    }

    #[instrument(level = "debug", skip(self), fields(hash = %self.hash))]
    async fn await_finality(&self) -> Result<(), FinalityError> {
        let receipt = timeout(self.config.timeout, self.poll_until_mined())
            .await
            .map_err(|_| FinalityError::Timeout { hash: self.hash, waited: self.config.timeout })??;

        if receipt.succeeded() {
            debug!(block = ?receipt.block_number, "transaction finalized");
            Ok(())
        } else {
            Err(FinalityError::Reverted { hash: self.hash })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    const TEST_HASH: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";

    fn fast_config() -> FinalityConfig {
        FinalityConfig::new(Duration::from_millis(50), Duration::from_millis(100))
    }

    fn receipt_body(status: &str) -> String {
        format!(
            r#"{{"jsonrpc":"2.0","id":0,"result":{{"transactionHash":"{TEST_HASH}","blockNumber":"0x10","status":"{status}"}}}}"#
        )
    }

    fn pending_against(server: &mockito::ServerGuard) -> EthPendingTransaction {
        let rpc = EthereumRpcClient::new(&server.url()).expect("failed to create client");
        EthPendingTransaction::new(TxHash::from_str(TEST_HASH).unwrap(), rpc, fast_config())
    }

    #[tokio::test]
    async fn test_await_finality_success() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(receipt_body("0x1"))
            .create_async()
            .await;

        let pending = pending_against(&server);
        pending
            .await_finality()
            .await
            .expect("transaction should finalize");
    }

    #[tokio::test]
    async fn test_await_finality_reverted() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(receipt_body("0x0"))
            .create_async()
            .await;

        let pending = pending_against(&server);
        let result = pending.await_finality().await;

        let expected_hash = TxHash::from_str(TEST_HASH).unwrap();
        assert!(matches!(result, Err(FinalityError::Reverted { hash }) if hash == expected_hash));
    }

    #[tokio::test]
    async fn test_await_finality_timeout_while_pending() {
        let mut server = mockito::Server::new_async().await;
        // The node never reports the transaction as mined; the configured
        // deadline (50ms) expires during the first poll interval (100ms).
        let _m = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"jsonrpc":"2.0","id":0,"result":null}"#)
            .create_async()
            .await;

        let pending = pending_against(&server);
        let result = pending.await_finality().await;

        assert!(matches!(
            result,
            Err(FinalityError::Timeout { waited, .. }) if waited == Duration::from_millis(50)
        ));
    }

    #[test]
    fn test_default_config() {
        let config = FinalityConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.poll_interval, Duration::from_secs(7));
    }
}
