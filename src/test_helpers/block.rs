//! A builder for creating RPC `Block` instances for testing.

use alloy::{
    primitives::B256,
    rpc::types::{Block, BlockTransactions, Header},
};

use crate::models::transaction::Transaction;

/// A builder for creating RPC `Block` instances for testing.
#[derive(Debug, Clone, Default)]
pub struct BlockBuilder {
    header: Header,
    transactions: Vec<Transaction>,
}

impl BlockBuilder {
    /// Creates a new `BlockBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the block number.
    pub fn number(mut self, number: u64) -> Self {
        self.header.number = number;
        self
    }

    /// Sets the block hash.
    pub fn hash(mut self, hash: B256) -> Self {
        self.header.hash = hash;
        self
    }

    /// Sets the block timestamp.
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.header.timestamp = timestamp;
        self
    }

    /// Adds a transaction to the block.
    pub fn transaction(mut self, tx: Transaction) -> Self {
        self.transactions.push(tx);
        self
    }

    /// Builds the `Block` with the provided values.
    pub fn build(self) -> Block {
        let txs = self.transactions.into_iter().map(|tx| tx.0).collect();
        Block {
            header: self.header,
            transactions: BlockTransactions::Full(txs),
            uncles: Default::default(),
            withdrawals: Default::default(),
        }
    }

    /// Builds the explorer's block model directly.
    pub fn build_model(self) -> crate::models::Block {
        crate::models::Block { header: self.header, transactions: self.transactions }
    }
}
