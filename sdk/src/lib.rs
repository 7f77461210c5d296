//! Zeebe client SDK for Rust
//!
//! Type-state command builders for the Zeebe gateway and the client that
//! dispatches them. Every command starts at one of the `new_*_command`
//! factories of [`ZbcClient`] and ends with `send`.

#![allow(clippy::result_large_err)]

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod job;

/// Testing utilities
///
/// Available only with the `testing` feature enabled.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types
pub use error::{CloseReason, ErrorClass, Result, ZbcError};

// Re-export config types
pub use config::{
    ClientConfig, ConfigError, DEFAULT_ADDRESS_HOST, DEFAULT_ADDRESS_PORT, DEFAULT_JOB_TIMEOUT,
    DEFAULT_JOB_WORKER_NAME,
};

// Re-export client types
pub use client::{ZbcClient, ZbcClientBuilder};

// Re-export command types
pub use commands::{
    ActivationStream, BrokerInfo, Command, CreatedJob, DeployedWorkflow, DeploymentResult,
    PartitionBrokerRole, PartitionInfo, ResourceType, Topology, WorkflowInstance,
    DEFAULT_JOB_RETRIES, EMPTY_PAYLOAD, LATEST_VERSION,
};
pub use job::{ActivatedJob, JobHeaders};

// Re-export core types
pub use zbc_core::protocol;
pub use zbc_core::{CommandKind, DispatchOptions, DispatchPolicy};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::{ZbcClient, ZbcClientBuilder};
    pub use crate::commands::{
        ActivationStream, Command, DeploymentResult, Topology, WorkflowInstance, LATEST_VERSION,
    };
    pub use crate::config::ClientConfig;
    pub use crate::error::{CloseReason, ErrorClass, Result, ZbcError};
    pub use crate::job::{ActivatedJob, JobHeaders};
    pub use futures::StreamExt;
    pub use serde_json::{json, Value};
}
