//! Configuration module for the explorer.

mod app_config;
mod helpers;
mod rpc_retry;

pub use app_config::AppConfig;
pub use helpers::deserialize_urls;
pub use rpc_retry::RpcRetryConfig;
