//! ZbcClient builder for fluent configuration

use crate::config::ClientConfig;
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tonic::transport::Channel;
use zbc_core::{GrpcTransport, Transport};

/// Builder for creating ZbcClient instances
///
/// Example:
/// ```ignore
/// let client = ZbcClient::builder()
///     .server_address("localhost", 26500)
///     .request_timeout(Duration::from_secs(10))
///     .default_worker_name("zbctl")
///     .build()
///     .await?;
/// ```
pub struct ZbcClientBuilder {
    config: ClientConfig,
    custom_channel: Option<Channel>,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for ZbcClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ZbcClientBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: ClientConfig::DEFAULT,
            custom_channel: None,
            transport: None,
        }
    }

    /// Set the gateway address
    pub fn server_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.config = self.config.with_address(host, port);
        self
    }

    /// Set the complete client configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the deadline of each unary attempt
    ///
    /// Default: 5 seconds
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_request_timeout(timeout);
        self
    }

    /// Set the inactivity timeout of activation streams
    ///
    /// Default: 15 seconds
    pub fn stream_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_stream_timeout(timeout);
        self
    }

    /// Set how often a retryable failure is retried
    ///
    /// Default: 3
    pub fn retries(mut self, retries: u32) -> Self {
        self.config = self.config.with_retries(retries);
        self
    }

    /// Set the job timeout of activations that don't set one
    ///
    /// Default: 5 minutes
    pub fn default_job_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_default_job_timeout(timeout);
        self
    }

    /// Set the worker name of activations that don't set one
    ///
    /// Default: "default"
    pub fn default_worker_name(mut self, worker: impl Into<String>) -> Self {
        self.config = self.config.with_default_worker_name(worker);
        self
    }

    /// Set a custom gRPC channel
    ///
    /// When set, server_address() is ignored.
    pub fn custom_channel(mut self, channel: Channel) -> Self {
        self.custom_channel = Some(channel);
        self
    }

    /// Set the transport directly, e.g. the `RecordingTransport` of the `testing` feature
    ///
    /// Takes precedence over custom_channel() and server_address().
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client, connecting to the gateway unless a channel or
    /// transport was supplied
    pub async fn build(self) -> Result<super::ZbcClient> {
        self.config.validate()?;

        let transport: Arc<dyn Transport> = match (self.transport, self.custom_channel) {
            (Some(transport), _) => transport,
            (None, Some(channel)) => Arc::new(GrpcTransport::new(channel)),
            (None, None) => {
                Arc::new(GrpcTransport::connect(&self.config.host, self.config.port).await?)
            }
        };

        super::ZbcClient::new(self.config, transport)
    }
}
