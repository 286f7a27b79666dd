use std::time::Duration;

use alloy::{
    primitives::{Address, Bytes, TxHash, U256, U64},
    rpc::{
        client::{ClientBuilder, ReqwestClient},
        types::{BlockNumberOrTag, TransactionRequest},
    },
    transports::http::reqwest,
};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::errors::RpcError;

/// Read-side JSON-RPC client for the handful of calls the liquidity flow
/// needs. It is cheap to clone, as the inner `ReqwestClient` shares its
/// connection pool behind an Arc.
///
/// Submissions never go through this client; those belong to the
/// caller-supplied [`crate::signer::TransactionSender`].
#[derive(Clone, Debug)]
pub struct EthereumRpcClient {
    inner: ReqwestClient,
    url: String,
}

impl EthereumRpcClient {
    /// Creates a new client against the given RPC URL with explicit HTTP
    /// timeouts (30s request, 10s connect).
    pub fn new(rpc_url: &str) -> Result<Self, RpcError> {
        let url = rpc_url
            .parse()
            .map_err(|e| RpcError::Setup(format!("invalid RPC URL: {e}")))?;

        let http_client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| RpcError::Setup(format!("failed to create HTTP client: {e}")))?;

        let inner = ClientBuilder::default().http_with_client(http_client, url);

        Ok(Self { inner, url: rpc_url.to_string() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_block_number(&self) -> Result<u64, RpcError> {
        let block_number: U64 = self
            .inner
            .request_noparams("eth_blockNumber")
            .await?;
        Ok(block_number.to::<u64>())
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_balance(
        &self,
        address: Address,
        block: BlockNumberOrTag,
    ) -> Result<U256, RpcError> {
        Ok(self
            .inner
            .request("eth_getBalance", (address, block))
            .await?)
    }

    /// Executes a read-only message call against `block` state.
    #[instrument(level = "debug", skip(self, request))]
    pub async fn eth_call(
        &self,
        request: TransactionRequest,
        block: BlockNumberOrTag,
    ) -> Result<Bytes, RpcError> {
        Ok(self
            .inner
            .request("eth_call", (&request, block))
            .await?)
    }

    /// Fetches the receipt of a broadcast transaction. `None` until the
    /// transaction is mined.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<ReceiptSummary>, RpcError> {
        let receipt: Option<ReceiptSummary> = self
            .inner
            .request("eth_getTransactionReceipt", (hash,))
            .await?;

        if let Some(summary) = &receipt {
            debug!(%hash, block = ?summary.block_number, "fetched receipt");
        }
        Ok(receipt)
    }
}

/// The receipt fields finality tracking needs. Nodes attach many more; we
/// deliberately deserialize just this subset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSummary {
    pub transaction_hash: TxHash,
    pub block_number: Option<U64>,
    /// 1 for success, 0 for revert. Pre-Byzantium receipts omit it.
    pub status: Option<U64>,
}

impl ReceiptSummary {
    /// Whether the transaction has been mined into a block.
    pub fn is_mined(&self) -> bool {
        self.block_number.is_some()
    }

    /// Whether execution succeeded. A missing status field (pre-Byzantium)
    /// counts as success; such receipts carry no failure signal at all.
    pub fn succeeded(&self) -> bool {
        self.status
            .map(|status| status == U64::from(1))
            .unwrap_or(true)
    }
}
