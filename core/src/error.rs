//! Core error types for the Zeebe gateway client
//!
//! Every failure coming back from the transport is classified here, so the
//! layers above can decide about retries without looking at message text.

use std::time::Duration;
use tonic::Code;

/// Core error type for transport and dispatch operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum CoreError {
    /// Connection, availability or deadline problem
    #[error("Transport error ({code:?}): {message}")]
    Transport {
        code: Code,
        message: String,
        retryable: bool,
    },

    /// The engine rejected a structurally valid command
    #[error("Rejected by gateway ({code:?}): {message}")]
    ServerRejected { code: Code, message: String },

    /// A response stream ended
    #[error("Stream closed: {0}")]
    StreamClosed(CloseReason),

    /// The owning client was closed
    #[error("Client closed")]
    Closed,

    /// A response could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type alias for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Why a response stream stopped producing items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The transport finished the stream.
    Completed,
    /// Nothing arrived within the stream timeout.
    InactivityTimeout(Duration),
}

impl std::fmt::Display for CloseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::InactivityTimeout(timeout) => {
                write!(f, "no activity for {}ms", timeout.as_millis())
            }
        }
    }
}

impl CoreError {
    /// Timeout of a single attempt, raised by the dispatcher itself.
    pub fn deadline_exceeded(timeout: Duration) -> Self {
        Self::Transport {
            code: Code::DeadlineExceeded,
            message: format!("no response within {}ms", timeout.as_millis()),
            retryable: true,
        }
    }

    /// Whether a new attempt may succeed where this one failed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { retryable: true, .. })
    }

    /// The gRPC status code, for transport and rejection errors.
    pub fn code(&self) -> Option<Code> {
        match self {
            Self::Transport { code, .. } | Self::ServerRejected { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether the stream ended because of its inactivity timeout.
    pub fn is_inactivity_timeout(&self) -> bool {
        matches!(
            self,
            Self::StreamClosed(CloseReason::InactivityTimeout(_))
        )
    }
}

fn is_retryable_code(code: Code) -> bool {
    matches!(
        code,
        Code::Unavailable | Code::ResourceExhausted | Code::Aborted | Code::DeadlineExceeded
    )
}

fn is_rejection_code(code: Code) -> bool {
    matches!(
        code,
        Code::InvalidArgument
            | Code::NotFound
            | Code::AlreadyExists
            | Code::FailedPrecondition
            | Code::OutOfRange
            | Code::Internal
    )
}

impl From<tonic::Status> for CoreError {
    fn from(status: tonic::Status) -> Self {
        let code = status.code();
        let message = status.message().to_string();
        if is_rejection_code(code) {
            Self::ServerRejected { code, message }
        } else {
            Self::Transport {
                code,
                message,
                retryable: is_retryable_code(code),
            }
        }
    }
}
