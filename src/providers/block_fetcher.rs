//! This module contains the `BlockFetcher` component, responsible for the raw
//! RPC calls made against an EVM node.

use alloy::{
    primitives::{Address, TxHash, U256},
    providers::Provider,
    rpc::types::Block,
};
use thiserror::Error;

use crate::models::Transaction;

/// Custom error type for the `BlockFetcher`.
#[derive(Error, Debug)]
pub enum BlockFetcherError {
    /// Error when interacting with the RPC provider.
    #[error("Provider error: {0}")]
    Provider(#[from] Box<dyn std::error::Error + Send + Sync>),
    /// Indicates that the requested block was not found.
    #[error("Block not found: {0}")]
    BlockNotFound(u64),
    /// Indicates that the requested transaction was not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TxHash),
}

/// A component responsible for issuing RPC requests to a single provider.
pub struct BlockFetcher<P> {
    /// The RPC provider used to fetch chain data.
    provider: P,
}

impl<P> BlockFetcher<P>
where
    P: Provider + Send + Sync,
{
    /// Creates a new `BlockFetcher`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Fetches a block with full transaction objects.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn fetch_block(&self, number: u64) -> Result<Block, BlockFetcherError> {
        self.provider
            .get_block_by_number(number.into())
            .full()
            .await
            .map_err(|e| BlockFetcherError::Provider(Box::new(e)))?
            .ok_or(BlockFetcherError::BlockNotFound(number))
    }

    /// Fetches a single transaction by hash.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn fetch_transaction(
        &self,
        tx_hash: TxHash,
    ) -> Result<Transaction, BlockFetcherError> {
        self.provider
            .get_transaction_by_hash(tx_hash)
            .await
            .map_err(|e| BlockFetcherError::Provider(Box::new(e)))?
            .map(Transaction)
            .ok_or(BlockFetcherError::TransactionNotFound(tx_hash))
    }

    /// Fetches the balance of an address at the latest block.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn fetch_balance(&self, address: Address) -> Result<U256, BlockFetcherError> {
        self.provider.get_balance(address).await.map_err(|e| BlockFetcherError::Provider(Box::new(e)))
    }

    /// Fetches the current block number from the node.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get_current_block_number(&self) -> Result<u64, BlockFetcherError> {
        self.provider.get_block_number().await.map_err(|e| BlockFetcherError::Provider(Box::new(e)))
    }
}
