//! A builder for creating `Transaction` instances for testing.

use alloy::{
    consensus::{Signed, TxEnvelope, TxLegacy, transaction::Recovered},
    primitives::{Address, B256, Bytes, Signature, TxKind, U256},
    rpc::types::Transaction as AlloyTransaction,
};

use crate::models::transaction::Transaction;

/// A builder for creating legacy `Transaction` instances for testing.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    hash: B256,
    from: Address,
    to: Option<Address>,
    value: U256,
    nonce: u64,
    input: Bytes,
    block_number: Option<u64>,
    transaction_index: Option<u64>,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self {
            hash: B256::default(),
            from: Address::default(),
            to: Some(Address::default()),
            value: U256::ZERO,
            nonce: 0,
            input: Bytes::new(),
            block_number: None,
            transaction_index: None,
        }
    }
}

impl TransactionBuilder {
    /// Creates a new `TransactionBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transaction hash.
    pub fn hash(mut self, hash: B256) -> Self {
        self.hash = hash;
        self
    }

    /// Sets the sender address.
    pub fn from(mut self, from: Address) -> Self {
        self.from = from;
        self
    }

    /// Sets the recipient address. `None` builds a contract creation.
    pub fn to(mut self, to: Option<Address>) -> Self {
        self.to = to;
        self
    }

    /// Sets the value transferred.
    pub fn value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Sets the sender nonce.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Sets the call data.
    pub fn input(mut self, input: Bytes) -> Self {
        self.input = input;
        self
    }

    /// Sets the number of the containing block.
    pub fn block_number(mut self, number: u64) -> Self {
        self.block_number = Some(number);
        self
    }

    /// Sets the index of the transaction within its block.
    pub fn transaction_index(mut self, index: u64) -> Self {
        self.transaction_index = Some(index);
        self
    }

    /// Builds the `Transaction` with the provided values.
    pub fn build(self) -> Transaction {
        let tx = TxLegacy {
            chain_id: Some(1),
            nonce: self.nonce,
            gas_price: 1_000_000_000,
            gas_limit: 21_000,
            to: self.to.map_or(TxKind::Create, TxKind::Call),
            value: self.value,
            input: self.input,
        };
        let signature = Signature::new(U256::from(1), U256::from(1), false);
        let envelope = TxEnvelope::Legacy(Signed::new_unchecked(tx, signature, self.hash));

        Transaction(AlloyTransaction {
            inner: Recovered::new_unchecked(envelope, self.from),
            block_hash: self.block_number.map(|_| B256::default()),
            block_number: self.block_number,
            transaction_index: self.transaction_index,
            effective_gas_price: None,
        })
    }
}
