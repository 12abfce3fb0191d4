use std::sync::Arc;

use alloy::primitives::{U256, utils::format_ether};
use clap::Subcommand;
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::{
    config::AppConfig,
    engine::{Explorer, ExplorerError},
    models::Transaction,
    providers::{
        rpc::{EvmRpcSource, ProviderError, create_provider},
        traits::DataSource,
    },
};

/// Errors produced while running a query command.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    /// The RPC provider could not be created.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
    /// The query itself failed.
    #[error("Query failed: {0}")]
    Explorer(#[from] ExplorerError),
    /// The result could not be serialized.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The queries exposed on the command line.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum QueryCommand {
    /// Prints the current chain height.
    LatestBlock,
    /// Prints a single block with its transactions.
    Block {
        /// The block number.
        number: u64,
    },
    /// Prints a run of consecutive blocks, newest first.
    LatestBlocks {
        /// The number of blocks to print. Defaults to the configured search
        /// window size.
        #[arg(short, long)]
        count: Option<u64>,
        /// The newest block to print. Defaults to the current chain height.
        #[arg(short, long)]
        start: Option<u64>,
    },
    /// Prints a transaction by hash.
    Tx {
        /// The transaction hash.
        hash: String,
    },
    /// Prints the balance of an address.
    Balance {
        /// The account address.
        address: String,
    },
    /// Prints the recent transactions sent from or to an address.
    AccountTxs {
        /// The account address.
        address: String,
    },
}

/// The balance of an address in wei and ether.
#[derive(Debug, Serialize)]
struct BalanceReport<'a> {
    address: &'a str,
    wei: U256,
    ether: String,
}

/// Transactions involving an address within the searched window.
#[derive(Debug, Serialize)]
struct AccountReport<'a> {
    address: &'a str,
    window_size: u64,
    transactions: Vec<Transaction>,
}

/// Runs a query against the explorer and returns its JSON rendering.
pub async fn run<D: DataSource + ?Sized>(
    command: &QueryCommand,
    explorer: &Explorer<D>,
) -> Result<Value, Error> {
    let value = match command {
        QueryCommand::LatestBlock => {
            json!({ "blockNumber": explorer.get_latest_block_number().await? })
        }
        QueryCommand::Block { number } => {
            serde_json::to_value(explorer.get_block_info(*number).await?)?
        }
        QueryCommand::LatestBlocks { count, start } => {
            let start = match start {
                Some(start) => *start,
                None => explorer.get_latest_block_number().await?,
            };
            let count = count.unwrap_or_else(|| explorer.search_window_size());
            serde_json::to_value(explorer.get_latest_blocks_info(start, count).await?)?
        }
        QueryCommand::Tx { hash } => serde_json::to_value(explorer.get_transaction(hash).await?)?,
        QueryCommand::Balance { address } => {
            let wei = explorer.get_address_balance(address).await?;
            serde_json::to_value(BalanceReport { address, wei, ether: format_ether(wei) })?
        }
        QueryCommand::AccountTxs { address } => {
            let transactions = explorer.get_transactions_by_account(address).await?;
            serde_json::to_value(AccountReport {
                address,
                window_size: explorer.search_window_size(),
                transactions,
            })?
        }
    };
    Ok(value)
}

/// Loads the configuration, connects to the node and prints the query result.
pub async fn execute(command: QueryCommand, config_dir: Option<&str>) -> Result<(), Error> {
    let config = AppConfig::new(config_dir)?;
    tracing::debug!(rpc_urls = ?config.rpc_urls, network_id = %config.network_id, "Configuration loaded.");

    let provider = create_provider(config.rpc_urls.clone(), config.rpc_retry_config.clone())?;
    let data_source = Arc::new(EvmRpcSource::new(provider));
    tracing::info!(retry_policy = ?config.rpc_retry_config, "EVM data source initialized with fallback and retry policy.");

    let explorer = Explorer::from_config(data_source, &config);
    let report = run(&command, &explorer).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
