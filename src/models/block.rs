//! Block data structures returned by the explorer.

use alloy::{
    primitives::B256,
    rpc::types::{Block as AlloyBlock, BlockTransactions, Header},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::transaction::Transaction;

/// Error returned when an RPC block cannot be turned into a [`Block`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockConversionError {
    /// The node returned transaction hashes instead of full transaction
    /// objects.
    #[error("Block {0} was returned without full transaction bodies")]
    IncompleteBlock(u64),
}

/// A block together with its full, ordered list of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// The block header.
    #[serde(flatten)]
    pub header: Header,
    /// Transactions in the order they appear in the block.
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Returns the block number.
    pub fn number(&self) -> u64 {
        self.header.number
    }

    /// Returns the block hash.
    pub fn hash(&self) -> B256 {
        self.header.hash
    }

    /// Returns the block timestamp in seconds since the epoch.
    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }

    /// Returns the number of transactions in the block.
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

impl TryFrom<AlloyBlock> for Block {
    type Error = BlockConversionError;

    fn try_from(block: AlloyBlock) -> Result<Self, Self::Error> {
        let transactions = match block.transactions {
            BlockTransactions::Full(txs) => txs.into_iter().map(Transaction).collect(),
            // An empty body deserializes as an empty hash list.
            BlockTransactions::Hashes(hashes) if hashes.is_empty() => Vec::new(),
            BlockTransactions::Hashes(_) => {
                return Err(BlockConversionError::IncompleteBlock(block.header.number));
            }
            BlockTransactions::Uncle => Vec::new(),
        };
        Ok(Self { header: block.header, transactions })
    }
}
