//! Client-level tests against a recording transport

mod activation_tests;
mod client_tests;
mod command_props;

use std::sync::Arc;
use zbc_sdk::testing::RecordingTransport;
use zbc_sdk::{ClientConfig, ZbcClient};

/// Client with the default configuration over a fresh recording transport
pub fn recording_client() -> (ZbcClient, Arc<RecordingTransport>) {
    recording_client_with(ClientConfig::default())
}

pub fn recording_client_with(config: ClientConfig) -> (ZbcClient, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::new());
    let client = ZbcClient::new(config, transport.clone()).expect("valid test configuration");
    (client, transport)
}
