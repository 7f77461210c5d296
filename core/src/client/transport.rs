//! Transport capability used by the dispatcher.

use crate::command::CommandKind;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use std::time::Duration;
use tonic::Status;

/// Encoded responses of a server-streaming call, in the order the server sent them.
pub type ResponseStream = Pin<Box<dyn Stream<Item = Result<Bytes, Status>> + Send>>;

/// Sends encoded requests to the gateway.
///
/// Implementations must tolerate concurrent unary calls and concurrently open
/// streams. Requests and responses are opaque encoded messages; the
/// dispatcher owns encoding, timeouts and retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Single request, single response. `timeout` is the deadline the
    /// dispatcher will enforce for this attempt.
    async fn unary(&self, kind: CommandKind, request: Bytes, timeout: Duration)
        -> Result<Bytes, Status>;

    /// Single request, open-ended sequence of responses.
    async fn server_streaming(
        &self,
        kind: CommandKind,
        request: Bytes,
    ) -> Result<ResponseStream, Status>;

    /// Release the underlying connection. Later calls should fail fast.
    async fn close(&self) {}
}
