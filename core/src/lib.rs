//! # Zeebe Client Core
//!
//! Transport and dispatch layer of the Zeebe gateway client.
//!
//! This crate knows how commands travel to the gateway, but not how they are
//! assembled. Assembling commands (the type-state builders) and the client
//! facade live in the SDK crate.
//!
//! ## Modules
//!
//! - [`protocol`] - gateway protocol messages
//! - [`command`] - command kinds, their gRPC methods and dispatch modes
//! - [`client`] - the transport capability and its gRPC implementation
//! - [`dispatch`] - timeouts, retries and streaming on top of a transport
//! - [`error`] - core error taxonomy

pub mod client;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod protocol;

pub use client::{GrpcTransport, ResponseStream, Transport};
pub use command::{CommandKind, DispatchMode};
pub use dispatch::{
    DispatchOptions, DispatchPolicy, Dispatcher, InactivityStream, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_RETRIES, DEFAULT_STREAM_TIMEOUT,
};
pub use error::{CloseReason, CoreError, CoreResult};
