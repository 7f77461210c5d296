//! Client configuration
//!
//! A [`ClientConfig`] is an explicit value handed to the client when it is
//! built. Commands read their defaults (job timeout, worker name) from the
//! client's configuration and can override them per invocation.

use std::borrow::Cow;
use std::time::Duration;
use zbc_core::{DispatchPolicy, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRIES, DEFAULT_STREAM_TIMEOUT};

/// Gateway host used when none is configured
pub const DEFAULT_ADDRESS_HOST: &str = "127.0.0.1";
/// Gateway port used when none is configured
pub const DEFAULT_ADDRESS_PORT: u16 = 26500;
/// How long an activated job stays exclusive to its worker
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(5 * 60);
/// Worker name sent with job activations
pub const DEFAULT_JOB_WORKER_NAME: &str = "default";

/// Configuration for a [`crate::ZbcClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Gateway host
    pub host: Cow<'static, str>,
    /// Gateway port
    pub port: u16,
    /// Deadline of each unary attempt
    pub request_timeout: Duration,
    /// Inactivity timeout of activation streams
    pub stream_timeout: Duration,
    /// Additional attempts for retryable failures
    pub retries: u32,
    /// Job timeout used by activations that don't set one
    pub default_job_timeout: Duration,
    /// Worker name used by activations that don't set one
    pub default_worker_name: Cow<'static, str>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ClientConfig {
    /// Local gateway with the library defaults
    pub const DEFAULT: Self = Self {
        host: Cow::Borrowed(DEFAULT_ADDRESS_HOST),
        port: DEFAULT_ADDRESS_PORT,
        request_timeout: DEFAULT_REQUEST_TIMEOUT,
        stream_timeout: DEFAULT_STREAM_TIMEOUT,
        retries: DEFAULT_RETRIES,
        default_job_timeout: DEFAULT_JOB_TIMEOUT,
        default_worker_name: Cow::Borrowed(DEFAULT_JOB_WORKER_NAME),
    };

    /// Default configuration for the gateway at `host:port`
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::DEFAULT.with_address(host, port)
    }

    pub fn with_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = Cow::Owned(host.into());
        self.port = port;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_stream_timeout(mut self, timeout: Duration) -> Self {
        self.stream_timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_default_job_timeout(mut self, timeout: Duration) -> Self {
        self.default_job_timeout = timeout;
        self
    }

    pub fn with_default_worker_name(mut self, worker: impl Into<String>) -> Self {
        self.default_worker_name = Cow::Owned(worker.into());
        self
    }

    /// Check the configuration for values the client can't work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "host must not be empty".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue(
                "request_timeout must be positive".to_string(),
            ));
        }
        if self.stream_timeout.is_zero() {
            return Err(ConfigError::InvalidValue(
                "stream_timeout must be positive".to_string(),
            ));
        }
        if self.default_job_timeout.is_zero() {
            return Err(ConfigError::InvalidValue(
                "default_job_timeout must be positive".to_string(),
            ));
        }
        if self.default_worker_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "default_worker_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Gateway endpoint URI
    pub fn address(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Dispatch policy derived from the timeouts and retry count
    pub fn dispatch_policy(&self) -> DispatchPolicy {
        DispatchPolicy {
            request_timeout: self.request_timeout,
            stream_timeout: self.stream_timeout,
            retries: self.retries,
        }
    }
}

/// Configuration validation error
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}
