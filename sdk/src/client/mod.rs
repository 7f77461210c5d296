//! Client for connecting to a Zeebe gateway

pub mod builder;
pub mod zbc_client;

// Re-export transport types from core
pub use zbc_core::{GrpcTransport, ResponseStream, Transport};

pub use builder::ZbcClientBuilder;
pub use zbc_client::ZbcClient;
