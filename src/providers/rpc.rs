//! This module provides the `DataSource` implementation backed by an EVM RPC
//! endpoint, along with the provider construction used by the binary.

use std::{num::NonZeroUsize, str::FromStr};

use alloy::{
    primitives::{Address, TxHash, U256},
    providers::{Provider, ProviderBuilder},
    rpc::client::RpcClient,
    transports::{
        http::{Http, reqwest::Url},
        layers::{FallbackLayer, RetryBackoffLayer},
    },
};
use async_trait::async_trait;
use tower::ServiceBuilder;

use super::{
    block_fetcher::{BlockFetcher, BlockFetcherError},
    traits::{DataSource, DataSourceError},
};
use crate::{
    config::RpcRetryConfig,
    models::{Block, Transaction},
};

/// A `DataSource` implementation that fetches data from an EVM RPC endpoint.
pub struct EvmRpcSource<P> {
    block_fetcher: BlockFetcher<P>,
}

impl<P> EvmRpcSource<P>
where
    P: Provider + Send + Sync,
{
    /// Creates a new `EvmRpcSource`.
    #[tracing::instrument(skip(provider), level = "debug")]
    pub fn new(provider: P) -> Self {
        Self { block_fetcher: BlockFetcher::new(provider) }
    }
}

#[async_trait]
impl<P> DataSource for EvmRpcSource<P>
where
    P: Provider + Send + Sync,
{
    #[tracing::instrument(skip(self), level = "debug")]
    async fn get_current_block_number(&self) -> Result<u64, DataSourceError> {
        tracing::debug!("Fetching current block number from RPC.");
        let block_number = self
            .block_fetcher
            .get_current_block_number()
            .await
            .map_err(Into::<DataSourceError>::into)?;
        tracing::debug!(current_block = block_number, "Successfully fetched current block number.");
        Ok(block_number)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn fetch_block(&self, block_number: u64) -> Result<Block, DataSourceError> {
        tracing::debug!(block_number, "Fetching block with transactions.");
        match self.block_fetcher.fetch_block(block_number).await {
            Ok(block) => {
                let block = Block::try_from(block)?;
                tracing::debug!(
                    block_number,
                    tx_count = block.transaction_count(),
                    "Successfully fetched block."
                );
                Ok(block)
            }
            Err(BlockFetcherError::BlockNotFound(num)) => {
                tracing::warn!(block_number = num, "Block not found.");
                Err(DataSourceError::BlockNotFound(num))
            }
            Err(e) => {
                tracing::error!(error = %e, block_number, "Failed to fetch block.");
                Err(e.into())
            }
        }
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn fetch_transaction(&self, tx_hash: &str) -> Result<Transaction, DataSourceError> {
        let hash = TxHash::from_str(tx_hash)
            .map_err(|_| DataSourceError::InvalidTransactionHash(tx_hash.to_string()))?;
        match self.block_fetcher.fetch_transaction(hash).await {
            Ok(tx) => Ok(tx),
            Err(BlockFetcherError::TransactionNotFound(hash)) => {
                tracing::warn!(tx_hash = %hash, "Transaction not found.");
                Err(DataSourceError::TransactionNotFound(tx_hash.to_string()))
            }
            Err(e) => {
                tracing::error!(error = %e, tx_hash, "Failed to fetch transaction.");
                Err(e.into())
            }
        }
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn fetch_balance(&self, address: &str) -> Result<U256, DataSourceError> {
        let parsed = Address::from_str(address)
            .map_err(|_| DataSourceError::InvalidAddress(address.to_string()))?;
        let balance = self.block_fetcher.fetch_balance(parsed).await.map_err(|e| {
            tracing::error!(error = %e, address, "Failed to fetch balance.");
            DataSourceError::from(e)
        })?;
        tracing::debug!(address, %balance, "Successfully fetched balance.");
        Ok(balance)
    }
}

/// Custom error type for provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Error when creating the provider.
    #[error("Provider creation failed: {0}")]
    CreationError(String),
}

/// Creates a new provider with the given RPC URLs.
///
/// Requests are spread over every URL by a fallback layer and retried with
/// backoff according to `retry_config`.
pub fn create_provider(
    urls: Vec<Url>,
    retry_config: RpcRetryConfig,
) -> Result<impl Provider, ProviderError> {
    let transport_count = NonZeroUsize::new(urls.len())
        .ok_or_else(|| ProviderError::CreationError("RPC URL list cannot be empty".into()))?;

    let fallback_layer = FallbackLayer::default().with_active_transport_count(transport_count);

    let transports: Vec<_> = urls.into_iter().map(Http::new).collect();

    let retry_layer = RetryBackoffLayer::new(
        retry_config.max_retry,
        retry_config.backoff_ms,
        retry_config.compute_units_per_second,
    );

    let service =
        ServiceBuilder::new().layer(retry_layer).layer(fallback_layer).service(transports);

    let client = RpcClient::builder().transport(service, false);
    Ok(ProviderBuilder::new().connect_client(client))
}

#[cfg(test)]
mod tests {
    use alloy::{
        primitives::{B256, U256, address},
        rpc::types::BlockTransactions,
    };
    use serde_json::Value;

    use super::*;
    use crate::test_helpers::{BlockBuilder, TransactionBuilder, mock_rpc_source};

    #[tokio::test]
    async fn test_fetch_block_converts_full_transactions() {
        let (source, asserter) = mock_rpc_source();
        let sender = address!("00000000000000000000000000000000000000aa");
        let raw = BlockBuilder::new()
            .number(10)
            .transaction(
                TransactionBuilder::new().hash(B256::repeat_byte(0x01)).from(sender).build(),
            )
            .build();
        asserter.push_success(&raw);

        let block = source.fetch_block(10).await.unwrap();

        assert_eq!(block.number(), 10);
        assert_eq!(block.transactions.len(), 1);
        assert_eq!(block.transactions[0].from(), sender);
    }

    #[tokio::test]
    async fn test_fetch_block_not_found() {
        let (source, asserter) = mock_rpc_source();
        asserter.push_success(&Value::Null);

        let result = source.fetch_block(10).await;

        assert!(matches!(result, Err(DataSourceError::BlockNotFound(10))));
    }

    #[tokio::test]
    async fn test_fetch_block_rejects_hash_only_body() {
        let (source, asserter) = mock_rpc_source();
        let mut raw = BlockBuilder::new().number(10).build();
        raw.transactions = BlockTransactions::Hashes(vec![B256::repeat_byte(0x05)]);
        asserter.push_success(&raw);

        let result = source.fetch_block(10).await;

        assert!(matches!(result, Err(DataSourceError::IncompleteBlock(10))));
    }

    #[tokio::test]
    async fn test_fetch_block_transport_failure() {
        let (source, asserter) = mock_rpc_source();
        asserter.push_failure_msg("node unavailable");

        let result = source.fetch_block(10).await;

        assert!(matches!(result, Err(DataSourceError::Provider(_))));
    }

    #[tokio::test]
    async fn test_fetch_transaction_success() {
        let (source, asserter) = mock_rpc_source();
        let hash = B256::repeat_byte(0x11);
        let sender = address!("00000000000000000000000000000000000000cc");
        asserter.push_success(&TransactionBuilder::new().hash(hash).from(sender).build());

        let tx = source.fetch_transaction(&hash.to_string()).await.unwrap();

        assert_eq!(tx.from(), sender);
    }

    #[tokio::test]
    async fn test_fetch_transaction_not_found() {
        let (source, asserter) = mock_rpc_source();
        asserter.push_success(&Value::Null);
        let hash = B256::repeat_byte(0x22).to_string();

        let result = source.fetch_transaction(&hash).await;

        assert!(matches!(result, Err(DataSourceError::TransactionNotFound(h)) if h == hash));
    }

    #[tokio::test]
    async fn test_fetch_transaction_rejects_malformed_hash() {
        // No response is queued: the hash must be rejected before any request.
        let (source, _asserter) = mock_rpc_source();

        let result = source.fetch_transaction("0x1234").await;

        assert!(matches!(result, Err(DataSourceError::InvalidTransactionHash(h)) if h == "0x1234"));
    }

    #[tokio::test]
    async fn test_fetch_balance_success() {
        let (source, asserter) = mock_rpc_source();
        asserter.push_success(&U256::from(5_000u64));

        let balance =
            source.fetch_balance("0x1111111111111111111111111111111111111111").await.unwrap();

        assert_eq!(balance, U256::from(5_000u64));
    }

    #[tokio::test]
    async fn test_fetch_balance_rejects_malformed_address() {
        let (source, _asserter) = mock_rpc_source();

        let result = source.fetch_balance("not-an-address").await;

        assert!(matches!(result, Err(DataSourceError::InvalidAddress(a)) if a == "not-an-address"));
    }

    #[test]
    fn test_create_provider_rejects_empty_url_list() {
        let result = create_provider(vec![], RpcRetryConfig::default());
        assert!(matches!(result, Err(ProviderError::CreationError(_))));
    }

    #[tokio::test]
    async fn test_create_provider_with_urls() {
        let urls = vec![Url::parse("http://localhost:8545").unwrap()];
        assert!(create_provider(urls, RpcRetryConfig::default()).is_ok());
    }
}
