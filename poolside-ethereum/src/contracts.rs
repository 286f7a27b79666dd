use std::sync::Arc;

use alloy::{
    primitives::{Address, TxHash, U256},
    rpc::types::{BlockNumberOrTag, TransactionInput, TransactionRequest},
};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::{
    erc20, exchange,
    errors::{RpcError, SubmitError},
    finality::{EthPendingTransaction, FinalityConfig, PendingTransaction},
    rpc::EthereumRpcClient,
    signer::TransactionSender,
};

/// The ERC20 token surface the deposit flow touches.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait TokenContract: Send + Sync {
    /// Grants `spender` an allowance of `amount` on the signer's behalf.
    async fn approve(
        &self,
        spender: Address,
        amount: U256,
    ) -> Result<Box<dyn PendingTransaction>, SubmitError>;

    /// Current allowance granted by `owner` to `spender`.
    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, RpcError>;

    /// Token balance of `owner`, e.g. to check a deposit is covered before
    /// submitting anything.
    async fn balance_of(&self, owner: Address) -> Result<U256, RpcError>;
}

/// The exchange pool surface the liquidity flow touches.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ExchangeContract: Send + Sync {
    /// The pool's on-chain address, i.e. the spender of token approvals.
    fn address(&self) -> Address;

    /// Deposits `token_amount` tokens plus `ether_value` wei into the pool.
    async fn add_liquidity(
        &self,
        token_amount: U256,
        ether_value: U256,
    ) -> Result<Box<dyn PendingTransaction>, SubmitError>;

    /// Burns `lp_amount` LP tokens for a share of both reserves.
    async fn remove_liquidity(
        &self,
        lp_amount: U256,
    ) -> Result<Box<dyn PendingTransaction>, SubmitError>;

    /// Token-side reserve, as reported by the contract.
    async fn token_reserve(&self) -> Result<U256, RpcError>;

    /// Ether-side reserve: the pool contract's own balance.
    async fn ether_reserve(&self) -> Result<U256, RpcError>;
}

/// `TokenContract` backed by a JSON-RPC node and a caller-supplied signer.
#[derive(Clone)]
pub struct EthTokenContract {
    address: Address,
    sender: Arc<dyn TransactionSender>,
    rpc: EthereumRpcClient,
    finality: FinalityConfig,
}

impl EthTokenContract {
    pub fn new(
        address: Address,
        sender: Arc<dyn TransactionSender>,
        rpc: EthereumRpcClient,
        finality: FinalityConfig,
    ) -> Self {
        Self { address, sender, rpc, finality }
    }

    fn call_request(&self, calldata: Vec<u8>) -> TransactionRequest {
        TransactionRequest::default()
            .to(self.address)
            .input(TransactionInput::both(calldata.into()))
    }
}

#[async_trait]
impl TokenContract for EthTokenContract {
    #[instrument(level = "debug", skip(self))]
    async fn approve(
        &self,
        spender: Address,
        amount: U256,
    ) -> Result<Box<dyn PendingTransaction>, SubmitError> {
        let request = self.call_request(erc20::encode_approve(spender, amount));
        let hash = self.sender.send_transaction(request).await?;
        debug!(%hash, token = %self.address, %spender, "approval submitted");
        Ok(Box::new(EthPendingTransaction::new(hash, self.rpc.clone(), self.finality.clone())))
    }

    #[instrument(level = "debug", skip(self))]
    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, RpcError> {
        let request = self.call_request(erc20::encode_allowance(owner, spender));
        let data = self
            .rpc
            .eth_call(request, BlockNumberOrTag::Latest)
            .await?;
        erc20::decode_allowance(data.as_ref())
            .map_err(|e| RpcError::UnexpectedResponse(format!("allowance returndata: {e}")))
    }

    #[instrument(level = "debug", skip(self))]
    async fn balance_of(&self, owner: Address) -> Result<U256, RpcError> {
        let request = self.call_request(erc20::encode_balance_of(owner));
        let data = self
            .rpc
            .eth_call(request, BlockNumberOrTag::Latest)
            .await?;
        erc20::decode_balance_of(data.as_ref())
            .map_err(|e| RpcError::UnexpectedResponse(format!("balanceOf returndata: {e}")))
    }
}

/// `ExchangeContract` backed by a JSON-RPC node and a caller-supplied
/// signer.
#[derive(Clone)]
pub struct EthExchangeContract {
    address: Address,
    sender: Arc<dyn TransactionSender>,
    rpc: EthereumRpcClient,
    finality: FinalityConfig,
}

impl EthExchangeContract {
    pub fn new(
        address: Address,
        sender: Arc<dyn TransactionSender>,
        rpc: EthereumRpcClient,
        finality: FinalityConfig,
    ) -> Self {
        Self { address, sender, rpc, finality }
    }

    fn call_request(&self, calldata: Vec<u8>) -> TransactionRequest {
        TransactionRequest::default()
            .to(self.address)
            .input(TransactionInput::both(calldata.into()))
    }

    fn track(&self, hash: TxHash) -> Box<dyn PendingTransaction> {
        Box::new(EthPendingTransaction::new(hash, self.rpc.clone(), self.finality.clone()))
    }
}

#[async_trait]
impl ExchangeContract for EthExchangeContract {
    fn address(&self) -> Address {
        self.address
    }

    #[instrument(level = "debug", skip(self))]
    async fn add_liquidity(
        &self,
        token_amount: U256,
        ether_value: U256,
    ) -> Result<Box<dyn PendingTransaction>, SubmitError> {
        let request = self
            .call_request(exchange::encode_add_liquidity(token_amount))
            .value(ether_value);
        let hash = self.sender.send_transaction(request).await?;
        debug!(%hash, %token_amount, %ether_value, "liquidity deposit submitted");
        Ok(self.track(hash))
    }

    #[instrument(level = "debug", skip(self))]
    async fn remove_liquidity(
        &self,
        lp_amount: U256,
    ) -> Result<Box<dyn PendingTransaction>, SubmitError> {
        let request = self.call_request(exchange::encode_remove_liquidity(lp_amount));
        let hash = self.sender.send_transaction(request).await?;
        debug!(%hash, %lp_amount, "liquidity withdrawal submitted");
        Ok(self.track(hash))
    }

    #[instrument(level = "debug", skip(self))]
    async fn token_reserve(&self) -> Result<U256, RpcError> {
        let request = self.call_request(exchange::encode_get_reserve());
        let data = self
            .rpc
            .eth_call(request, BlockNumberOrTag::Latest)
            .await?;
        exchange::decode_get_reserve(data.as_ref())
            .map_err(|e| RpcError::UnexpectedResponse(format!("getReserve returndata: {e}")))
    }

    #[instrument(level = "debug", skip(self))]
    async fn ether_reserve(&self) -> Result<U256, RpcError> {
        self.rpc
            .get_balance(self.address, BlockNumberOrTag::Latest)
            .await
    }
}
