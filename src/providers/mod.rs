//! Access to the EVM node backing the explorer.

pub mod block_fetcher;
pub mod rpc;
pub mod traits;
