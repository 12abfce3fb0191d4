//! An in-memory `DataSource` for tests that need a small, fully controlled
//! chain.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    str::FromStr,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::{
    models::{Block, Transaction},
    providers::traits::{DataSource, DataSourceError},
};

/// A chain held in memory. The tip is the highest inserted block unless set
/// explicitly.
#[derive(Debug, Default)]
pub struct InMemoryDataSource {
    blocks: BTreeMap<u64, Block>,
    balances: HashMap<Address, U256>,
    latencies: HashMap<u64, Duration>,
    unavailable: HashSet<u64>,
    tip: Option<u64>,
    tip_reads: AtomicUsize,
}

impl InMemoryDataSource {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a block.
    pub fn block(mut self, block: Block) -> Self {
        self.blocks.insert(block.number(), block);
        self
    }

    /// Sets the balance of an address.
    pub fn balance(mut self, address: Address, balance: U256) -> Self {
        self.balances.insert(address, balance);
        self
    }

    /// Overrides the reported chain height.
    pub fn tip(mut self, tip: u64) -> Self {
        self.tip = Some(tip);
        self
    }

    /// Delays the response for a block.
    pub fn latency(mut self, number: u64, delay: Duration) -> Self {
        self.latencies.insert(number, delay);
        self
    }

    /// Makes requests for a block fail with a provider error.
    pub fn unavailable(mut self, number: u64) -> Self {
        self.unavailable.insert(number);
        self
    }

    /// The number of times the chain height was requested.
    pub fn tip_reads(&self) -> usize {
        self.tip_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for InMemoryDataSource {
    async fn get_current_block_number(&self) -> Result<u64, DataSourceError> {
        self.tip_reads.fetch_add(1, Ordering::SeqCst);
        self.tip
            .or_else(|| self.blocks.keys().next_back().copied())
            .ok_or_else(|| DataSourceError::Provider("empty chain".into()))
    }

    async fn fetch_block(&self, block_number: u64) -> Result<Block, DataSourceError> {
        if let Some(delay) = self.latencies.get(&block_number) {
            tokio::time::sleep(*delay).await;
        }
        if self.unavailable.contains(&block_number) {
            return Err(DataSourceError::Provider(
                format!("block {block_number} unavailable").into(),
            ));
        }
        self.blocks.get(&block_number).cloned().ok_or(DataSourceError::BlockNotFound(block_number))
    }

    async fn fetch_transaction(&self, tx_hash: &str) -> Result<Transaction, DataSourceError> {
        let hash = TxHash::from_str(tx_hash)
            .map_err(|_| DataSourceError::InvalidTransactionHash(tx_hash.to_string()))?;
        self.blocks
            .values()
            .flat_map(|block| block.transactions.iter())
            .find(|tx| tx.hash() == hash)
            .cloned()
            .ok_or_else(|| DataSourceError::TransactionNotFound(tx_hash.to_string()))
    }

    async fn fetch_balance(&self, address: &str) -> Result<U256, DataSourceError> {
        let parsed = Address::from_str(address)
            .map_err(|_| DataSourceError::InvalidAddress(address.to_string()))?;
        Ok(self.balances.get(&parsed).copied().unwrap_or_default())
    }
}
