//! Transport to the Zeebe gateway.
//!
//! [`Transport`] is the capability the dispatcher talks to; [`GrpcTransport`]
//! is the production implementation over a tonic channel.

mod grpc;
mod transport;

pub use grpc::GrpcTransport;
pub use transport::{ResponseStream, Transport};
