use alloy::{
    providers::{DynProvider, Provider, ProviderBuilder},
    transports::mock::Asserter,
};

use crate::providers::rpc::EvmRpcSource;

/// Creates a mock provider and an asserter for testing purposes.
///
/// Responses pushed onto the asserter are served in the order requests are
/// issued.
pub fn mock_provider() -> (DynProvider, Asserter) {
    let asserter = Asserter::new();
    let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone()).erased();
    (provider, asserter)
}

/// Creates an `EvmRpcSource` backed by a mock provider, together with its
/// asserter.
pub fn mock_rpc_source() -> (EvmRpcSource<DynProvider>, Asserter) {
    let (provider, asserter) = mock_provider();
    (EvmRpcSource::new(provider), asserter)
}
