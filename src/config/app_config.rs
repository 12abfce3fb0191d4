use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

use super::{RpcRetryConfig, deserialize_urls};

/// Provides the default value for network_id.
fn default_network_id() -> String {
    "mainnet".to_string()
}

/// Provides the default value for search_window_size.
fn default_search_window_size() -> u64 {
    5
}

/// Provides the default value for concurrency.
fn default_concurrency() -> usize {
    5
}

/// Application configuration for the explorer.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// RPC URLs for the Ethereum node.
    #[serde(deserialize_with = "deserialize_urls")]
    pub rpc_urls: Vec<Url>,

    /// Name of the network, used to label log output.
    #[serde(default = "default_network_id")]
    pub network_id: String,

    /// Optional retry configuration.
    #[serde(default)]
    pub rpc_retry_config: RpcRetryConfig,

    /// The number of most recent blocks scanned by an account search.
    #[serde(default = "default_search_window_size")]
    pub search_window_size: u64,

    /// The number of concurrent block fetches within a window.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading `app.yaml` from the configuration
    /// directory and applying `EXPLORER__*` environment overrides.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        Self::load(config_dir, Self::environment())
    }

    /// The environment source; `rpc_urls` is read as a comma separated list.
    fn environment() -> Environment {
        Environment::with_prefix("EXPLORER")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("rpc_urls")
            .try_parsing(true)
    }

    fn load(config_dir: Option<&str>, environment: Environment) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)).required(false))
            .add_source(environment)
            .build()?;
        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values that deserialization alone cannot enforce.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc_urls.is_empty() {
            return Err(ConfigError::Message("rpc_urls must contain at least one URL".into()));
        }
        if self.search_window_size == 0 {
            return Err(ConfigError::Message("search_window_size must be at least 1".into()));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::Message("concurrency must be at least 1".into()));
        }
        Ok(())
    }

    /// Creates a new `AppConfigBuilder` for testing purposes.
    #[cfg(test)]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// A builder for creating `AppConfig` instances for testing.
#[cfg(test)]
#[derive(Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn rpc_urls(mut self, rpc_urls: Vec<Url>) -> Self {
        self.config.rpc_urls = rpc_urls;
        self
    }

    pub fn search_window_size(mut self, size: u64) -> Self {
        self.config.search_window_size = size;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
