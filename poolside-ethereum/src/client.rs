use std::sync::Arc;

use alloy::primitives::{Address, TxHash, U256};
use poolside_common::quote::LiquidityQuote;
use tracing::{info, instrument};

use crate::{
    contracts::{
        EthExchangeContract, EthTokenContract, ExchangeContract, TokenContract,
    },
    errors::{LiquidityError, QuoteError},
    finality::FinalityConfig,
    rpc::EthereumRpcClient,
    signer::TransactionSender,
    AmountCodec,
};

/// Outcome of a completed two-step liquidity deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLiquidityOutcome {
    /// Hash of the finalized approval transaction.
    pub approval: TxHash,
    /// Hash of the finalized deposit transaction.
    pub deposit: TxHash,
}

/// Client for a single ETH/ERC20 constant-product pool.
///
/// Depositing is a two-step sequence: the pool withdraws the token side via
/// `transferFrom`, so it first needs an allowance, and only once that
/// approval is final is the deposit broadcast. The two steps are not atomic;
/// see [`LiquidityError`] for the partial-failure contract.
///
/// Until the first submission has gone out, dropping a returned future
/// cancels the operation cleanly. After that the transactions are broadcast
/// and only the bounded finality wait can be abandoned.
pub struct LiquidityClient {
    token: Arc<dyn TokenContract>,
    exchange: Arc<dyn ExchangeContract>,
}

impl LiquidityClient {
    pub fn new(token: Arc<dyn TokenContract>, exchange: Arc<dyn ExchangeContract>) -> Self {
        Self { token, exchange }
    }

    /// Wires up a client against RPC-backed contract proxies, submitting
    /// through `sender`.
    pub fn from_parts(
        token_address: Address,
        exchange_address: Address,
        sender: Arc<dyn TransactionSender>,
        rpc: EthereumRpcClient,
        finality: FinalityConfig,
    ) -> Self {
        let token = EthTokenContract::new(
            token_address,
            sender.clone(),
            rpc.clone(),
            finality.clone(),
        );
        let exchange = EthExchangeContract::new(exchange_address, sender, rpc, finality);
        Self::new(Arc::new(token), Arc::new(exchange))
    }

    /// Deposits `token_amount` tokens and `ether_amount` wei into the pool.
    ///
    /// Submits the token approval for the pool, waits for it to finalize,
    /// then submits the deposit and waits again. The deposit is never
    /// broadcast unless the approval reached finality. Failures carry the
    /// stage they happened in, so a caller seeing
    /// [`LiquidityError::Deposit`] knows the allowance is already granted
    /// and can re-submit the deposit alone or revoke the approval.
    #[instrument(level = "debug", skip(self))]
    pub async fn add_liquidity(
        &self,
        token_amount: U256,
        ether_amount: U256,
    ) -> Result<AddLiquidityOutcome, LiquidityError> {
        let spender = self.exchange.address();

        let approval = self
            .token
            .approve(spender, token_amount)
            .await
            .map_err(|e| LiquidityError::Approval(e.into()))?;
        approval
            .await_finality()
            .await
            .map_err(|e| LiquidityError::Approval(e.into()))?;
        info!(hash = %approval.hash(), %spender, "token approval finalized");

        let deposit = self
            .exchange
            .add_liquidity(token_amount, ether_amount)
            .await
            .map_err(|e| LiquidityError::Deposit(e.into()))?;
        deposit
            .await_finality()
            .await
            .map_err(|e| LiquidityError::Deposit(e.into()))?;
        info!(hash = %deposit.hash(), "liquidity deposit finalized");

        Ok(AddLiquidityOutcome { approval: approval.hash(), deposit: deposit.hash() })
    }

    /// Burns `lp_amount` LP tokens, withdrawing the proportional share of
    /// both reserves. LP shares are the pool's own ERC20, so there is no
    /// approval step.
    #[instrument(level = "debug", skip(self))]
    pub async fn remove_liquidity(&self, lp_amount: U256) -> Result<TxHash, LiquidityError> {
        let withdrawal = self
            .exchange
            .remove_liquidity(lp_amount)
            .await
            .map_err(|e| LiquidityError::Withdrawal(e.into()))?;
        withdrawal
            .await_finality()
            .await
            .map_err(|e| LiquidityError::Withdrawal(e.into()))?;
        info!(hash = %withdrawal.hash(), "liquidity withdrawal finalized");
        Ok(withdrawal.hash())
    }

    /// Quotes the token deposit that keeps the pool ratio constant when
    /// `ether_to_add` wei is deposited, against the current on-chain
    /// reserves.
    ///
    /// Fails on an empty pool ([`QuoteError::Ratio`]); the first deposit
    /// into an empty pool picks both amounts freely and needs no quote.
    #[instrument(level = "debug", skip(self))]
    pub async fn quote_token_deposit(&self, ether_to_add: U256) -> Result<U256, QuoteError> {
        let ether_reserve = self.exchange.ether_reserve().await?;
        let token_reserve = self.exchange.token_reserve().await?;

        let quote = LiquidityQuote::from_reserves(
            &ether_to_add.to_biguint(),
            &ether_reserve.to_biguint(),
            &token_reserve.to_biguint(),
        )?;
        Ok(U256::from_biguint(&quote.token_deposit)?)
    }
}
