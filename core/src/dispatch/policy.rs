//! Timeout and retry parameters for dispatching commands

use crate::command::CommandKind;
use crate::error::{CoreError, CoreResult};
use std::time::Duration;

/// Retries for idempotent unary commands
pub const DEFAULT_RETRIES: u32 = 3;
/// Deadline of a single unary attempt
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
/// Longest silence tolerated on a response stream
pub const DEFAULT_STREAM_TIMEOUT: Duration = Duration::from_secs(15);

/// Timeout and retry behavior applied by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// Deadline of each unary attempt
    pub request_timeout: Duration,
    /// Inactivity timeout of a response stream; each received item resets it
    pub stream_timeout: Duration,
    /// Additional attempts after the first one fails with a retryable error
    pub retries: u32,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl DispatchPolicy {
    pub const DEFAULT: Self = Self {
        request_timeout: DEFAULT_REQUEST_TIMEOUT,
        stream_timeout: DEFAULT_STREAM_TIMEOUT,
        retries: DEFAULT_RETRIES,
    };

    /// Create a new policy with validation
    pub fn new(request_timeout: Duration, stream_timeout: Duration, retries: u32) -> CoreResult<Self> {
        if request_timeout.is_zero() {
            return Err(CoreError::InvalidConfiguration(
                "request_timeout must be positive".to_string(),
            ));
        }
        if stream_timeout.is_zero() {
            return Err(CoreError::InvalidConfiguration(
                "stream_timeout must be positive".to_string(),
            ));
        }

        Ok(Self {
            request_timeout,
            stream_timeout,
            retries,
        })
    }

    /// This policy with per-invocation overrides applied.
    pub fn with_options(&self, options: &DispatchOptions) -> Self {
        Self {
            request_timeout: options.request_timeout.unwrap_or(self.request_timeout),
            stream_timeout: options.stream_timeout.unwrap_or(self.stream_timeout),
            retries: options.retries.unwrap_or(self.retries),
        }
    }

    /// Whether `error` from a `kind` dispatch may be followed by another attempt.
    ///
    /// Only idempotent commands are retried. The gateway may have accepted a
    /// request before a failure is reported, even `UNAVAILABLE`, so sending
    /// any other command twice could create a second instance or message.
    pub fn is_retry_allowed(&self, kind: CommandKind, error: &CoreError) -> bool {
        kind.is_idempotent() && error.is_retryable()
    }
}

/// Per-invocation overrides of the client's [`DispatchPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    pub request_timeout: Option<Duration>,
    pub stream_timeout: Option<Duration>,
    pub retries: Option<u32>,
}

impl DispatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_stream_timeout(mut self, timeout: Duration) -> Self {
        self.stream_timeout = Some(timeout);
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }
}
