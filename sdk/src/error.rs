//! Error types for the Zeebe client SDK

pub use zbc_core::{CloseReason, CoreError};

use crate::config::ConfigError;
use tonic::Code;

/// Main error type for the Zeebe client SDK
///
/// The variants separate "fix your command" ([`ZbcError::Validation`]),
/// "try again" ([`ZbcError::is_retryable`]) and "the engine said no"
/// ([`ZbcError::ServerRejected`]).
#[derive(Debug, thiserror::Error)]
pub enum ZbcError {
    /// Command assembled with contradictory or missing logical fields
    #[error("Validation error: {0}")]
    Validation(String),

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

    /// Activation stream ended
    #[error("Stream closed: {0}")]
    StreamClosed(CloseReason),

    /// The client was closed
    #[error("Client closed")]
    Closed,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Response could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Zeebe client operations
pub type Result<T> = std::result::Result<T, ZbcError>;

impl From<CoreError> for ZbcError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Transport {
                code,
                message,
                retryable,
            } => ZbcError::Transport {
                code,
                message,
                retryable,
            },
            CoreError::ServerRejected { code, message } => {
                ZbcError::ServerRejected { code, message }
            }
            CoreError::StreamClosed(reason) => ZbcError::StreamClosed(reason),
            CoreError::Closed => ZbcError::Closed,
            CoreError::Decode(e) => ZbcError::Decode(e),
            CoreError::InvalidConfiguration(msg) => ZbcError::InvalidConfiguration(msg),
        }
    }
}

impl From<ConfigError> for ZbcError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidValue(msg) => ZbcError::InvalidConfiguration(msg),
        }
    }
}

impl ZbcError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ZbcError::Validation(message.into())
    }

    /// Whether dispatching the same command again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ZbcError::Transport { retryable: true, .. })
    }

    /// How the activation stream ended, if this error reports it.
    pub fn close_reason(&self) -> Option<CloseReason> {
        match self {
            ZbcError::StreamClosed(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Coarse class for front ends that map failures to process exit codes.
    pub fn class(&self) -> ErrorClass {
        match self {
            ZbcError::InvalidConfiguration(_) => ErrorClass::Configuration,
            ZbcError::Io(_) => ErrorClass::Io,
            ZbcError::Transport { code, .. }
                if matches!(code, Code::Unavailable | Code::DeadlineExceeded) =>
            {
                ErrorClass::Io
            }
            _ => ErrorClass::General,
        }
    }
}

/// Failure class exposed to front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    General,
    Configuration,
    Io,
}

impl ErrorClass {
    /// Conventional process exit code (sysexits values for configuration and I/O).
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorClass::General => 1,
            ErrorClass::Configuration => 78,
            ErrorClass::Io => 74,
        }
    }
}
