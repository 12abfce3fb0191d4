//! The query service answering explorer requests against a `DataSource`.

use std::sync::Arc;

use alloy::primitives::U256;
use futures::{StreamExt, TryStreamExt, stream};
use thiserror::Error;

use super::{
    matching::AddressQuery,
    window::{BlockWindow, WindowError},
};
use crate::{
    config::AppConfig,
    models::{Block, Transaction},
    providers::traits::{DataSource, DataSourceError},
};

/// Errors surfaced by explorer queries.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The requested block window is empty or reaches below block zero.
    #[error("Invalid block range: {0}")]
    Range(#[from] WindowError),

    /// The node could not be reached, or the requested item does not exist.
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    /// The node answered a block request with a different block.
    #[error("Requested block {expected} but the node returned block {actual}")]
    UnexpectedBlock {
        /// The block number that was requested.
        expected: u64,
        /// The block number that was returned.
        actual: u64,
    },
}

/// Read-only queries over the chain data exposed by a `DataSource`.
///
/// Nothing is cached between calls: every query reads from the node.
pub struct Explorer<D: DataSource + ?Sized> {
    /// The node the explorer reads from.
    data_source: Arc<D>,
    /// Number of blocks, ending at the tip, scanned by account searches.
    search_window_size: u64,
    /// Maximum number of block requests in flight during a window fetch.
    concurrency: usize,
}

impl<D: DataSource + ?Sized> Explorer<D> {
    /// Creates a new `Explorer`.
    ///
    /// A `concurrency` of zero is treated as one.
    pub fn new(data_source: Arc<D>, search_window_size: u64, concurrency: usize) -> Self {
        Self { data_source, search_window_size, concurrency: concurrency.max(1) }
    }

    /// Creates a new `Explorer` using the window size and concurrency from the
    /// application configuration.
    pub fn from_config(data_source: Arc<D>, config: &AppConfig) -> Self {
        Self::new(data_source, config.search_window_size, config.concurrency)
    }

    /// The number of blocks scanned by [`Self::get_transactions_by_account`].
    pub fn search_window_size(&self) -> u64 {
        self.search_window_size
    }

    /// Returns the current chain height reported by the node.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get_latest_block_number(&self) -> Result<u64, ExplorerError> {
        Ok(self.data_source.get_current_block_number().await?)
    }

    /// Returns a single block with its transactions.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get_block_info(&self, block_number: u64) -> Result<Block, ExplorerError> {
        self.fetch_expected_block(block_number).await
    }

    /// Returns the `count` blocks ending at `start`, newest first.
    ///
    /// Fails with [`ExplorerError::Range`] before contacting the node if the
    /// window is empty or would reach below block zero. Any failed block fetch
    /// aborts the whole request; partial windows are never returned.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get_latest_blocks_info(
        &self,
        start: u64,
        count: u64,
    ) -> Result<Vec<Block>, ExplorerError> {
        let window = BlockWindow::new(start, count)?;
        tracing::debug!(
            start = window.start(),
            end = window.end(),
            concurrency = self.concurrency,
            "Fetching block window."
        );

        // `buffered` yields results in submission order, so the window stays
        // newest-first however the requests complete.
        let blocks: Vec<Block> = stream::iter(window.numbers())
            .map(|number| self.fetch_expected_block(number))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        tracing::debug!(block_count = blocks.len(), "Fetched block window.");
        Ok(blocks)
    }

    /// Returns a transaction by its hex encoded hash.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get_transaction(&self, tx_hash: &str) -> Result<Transaction, ExplorerError> {
        Ok(self.data_source.fetch_transaction(tx_hash).await?)
    }

    /// Returns the balance of an address in wei.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get_address_balance(&self, address: &str) -> Result<U256, ExplorerError> {
        Ok(self.data_source.fetch_balance(address).await?)
    }

    /// Returns every transaction sent from or to `address` within the most
    /// recent `search_window_size` blocks.
    ///
    /// The tip is read once per call. Results are ordered newest block first,
    /// then by position within the block.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get_transactions_by_account(
        &self,
        address: &str,
    ) -> Result<Vec<Transaction>, ExplorerError> {
        let query = AddressQuery::new(address);
        let tip = self.get_latest_block_number().await?;
        let blocks = self.get_latest_blocks_info(tip, self.search_window_size).await?;

        let matches: Vec<Transaction> = blocks
            .into_iter()
            .flat_map(|block| block.transactions)
            .filter(|tx| query.matches(tx))
            .collect();

        tracing::info!(
            address = query.as_str(),
            tip,
            match_count = matches.len(),
            "Account search finished."
        );
        Ok(matches)
    }

    async fn fetch_expected_block(&self, block_number: u64) -> Result<Block, ExplorerError> {
        let block = self.data_source.fetch_block(block_number).await?;
        if block.number() != block_number {
            tracing::error!(
                expected = block_number,
                actual = block.number(),
                "Node returned an unexpected block."
            );
            return Err(ExplorerError::UnexpectedBlock {
                expected: block_number,
                actual: block.number(),
            });
        }
        Ok(block)
    }
}
