//! This module defines the interface for reading data from an EVM-compatible
//! node.

use alloy::primitives::U256;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use super::block_fetcher::BlockFetcherError;
use crate::models::{Block, BlockConversionError, Transaction};

/// Custom error type for data source operations.
#[derive(Error, Debug)]
pub enum DataSourceError {
    /// Error when interacting with the provider (node unreachable or the
    /// request failed).
    #[error("Provider error: {0}")]
    Provider(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// Indicates that the requested block was not found.
    #[error("Block not found: {0}")]
    BlockNotFound(u64),

    /// Indicates that the requested transaction was not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// The supplied transaction hash is not a 32-byte hex string.
    #[error("Invalid transaction hash: {0}")]
    InvalidTransactionHash(String),

    /// The supplied address is not a 20-byte hex string.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The node returned a block without full transaction bodies.
    #[error("Incomplete block: {0}")]
    IncompleteBlock(u64),
}

impl DataSourceError {
    /// Returns `true` if the error reports a missing block or transaction.
    ///
    /// A malformed transaction hash cannot name any transaction, so it counts
    /// as not found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BlockNotFound(_)
                | Self::TransactionNotFound(_)
                | Self::InvalidTransactionHash(_)
        )
    }
}

impl From<BlockConversionError> for DataSourceError {
    fn from(err: BlockConversionError) -> Self {
        match err {
            BlockConversionError::IncompleteBlock(number) => Self::IncompleteBlock(number),
        }
    }
}

impl From<BlockFetcherError> for DataSourceError {
    fn from(err: BlockFetcherError) -> Self {
        match err {
            BlockFetcherError::Provider(e) => Self::Provider(e),
            BlockFetcherError::BlockNotFound(number) => Self::BlockNotFound(number),
            BlockFetcherError::TransactionNotFound(hash) => {
                Self::TransactionNotFound(hash.to_string())
            }
        }
    }
}

/// A trait for a data source that can fetch blockchain data.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches the current block number from the data source.
    async fn get_current_block_number(&self) -> Result<u64, DataSourceError>;

    /// Fetches a single block together with its full transactions.
    async fn fetch_block(&self, block_number: u64) -> Result<Block, DataSourceError>;

    /// Fetches a transaction by its hex encoded hash.
    async fn fetch_transaction(&self, tx_hash: &str) -> Result<Transaction, DataSourceError>;

    /// Fetches the balance, in wei, of a hex encoded address at the latest
    /// block.
    async fn fetch_balance(&self, address: &str) -> Result<U256, DataSourceError>;
}
