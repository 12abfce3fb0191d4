//! A set of helpers for testing

mod block;
mod data_source;
mod provider;
mod transaction;

pub use block::BlockBuilder;
pub use data_source::InMemoryDataSource;
pub use provider::{mock_provider, mock_rpc_source};
pub use transaction::TransactionBuilder;
