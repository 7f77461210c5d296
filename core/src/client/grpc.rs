//! gRPC transport over a tonic channel

use crate::client::transport::{ResponseStream, Transport};
use crate::command::CommandKind;
use crate::error::{CoreError, CoreResult};
use async_trait::async_trait;
use bytes::{Buf, BufMut, Bytes};
use parking_lot::RwLock;
use std::time::Duration;
use tonic::codec::{Codec, DecodeBuf, Decoder, EncodeBuf, Encoder};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::Status;
use tracing::{debug, info};

/// Codec that hands message bodies through unchanged.
///
/// Requests are already protobuf-encoded by the dispatcher, and responses are
/// decoded there as well.
#[derive(Debug, Clone, Copy, Default)]
struct PassThroughCodec;

impl Codec for PassThroughCodec {
    type Encode = Bytes;
    type Decode = Bytes;
    type Encoder = PassThroughCodec;
    type Decoder = PassThroughCodec;

    fn encoder(&mut self) -> Self::Encoder {
        PassThroughCodec
    }

    fn decoder(&mut self) -> Self::Decoder {
        PassThroughCodec
    }
}

impl Encoder for PassThroughCodec {
    type Item = Bytes;
    type Error = Status;

    fn encode(&mut self, item: Self::Item, dst: &mut EncodeBuf<'_>) -> Result<(), Self::Error> {
        dst.put_slice(&item);
        Ok(())
    }
}

impl Decoder for PassThroughCodec {
    type Item = Bytes;
    type Error = Status;

    fn decode(&mut self, src: &mut DecodeBuf<'_>) -> Result<Option<Self::Item>, Self::Error> {
        let len = src.remaining();
        Ok(Some(src.copy_to_bytes(len)))
    }
}

/// Transport to a Zeebe gateway over HTTP/2.
///
/// The channel multiplexes concurrent calls; cloning it is cheap. After
/// [`Transport::close`] the channel is dropped and every call fails with
/// `UNAVAILABLE`.
pub struct GrpcTransport {
    channel: RwLock<Option<Channel>>,
}

impl GrpcTransport {
    /// Wrap an existing channel
    pub fn new(channel: Channel) -> Self {
        Self {
            channel: RwLock::new(Some(channel)),
        }
    }

    /// Connect to `http://{host}:{port}`
    pub async fn connect(host: &str, port: u16) -> CoreResult<Self> {
        let endpoint = format!("http://{}:{}", host, port);
        let channel = Channel::from_shared(endpoint.clone())
            .map_err(|e| CoreError::InvalidConfiguration(e.to_string()))?
            .connect()
            .await
            .map_err(|e| CoreError::Transport {
                code: tonic::Code::Unavailable,
                message: format!("failed to connect to {}: {}", endpoint, e),
                retryable: true,
            })?;

        info!(endpoint = %endpoint, "Connected to gateway");
        Ok(Self::new(channel))
    }

    fn channel(&self) -> Result<Channel, Status> {
        self.channel
            .read()
            .clone()
            .ok_or_else(|| Status::unavailable("transport closed"))
    }

    async fn ready_client(&self) -> Result<tonic::client::Grpc<Channel>, Status> {
        let mut grpc = tonic::client::Grpc::new(self.channel()?);
        grpc.ready()
            .await
            .map_err(|e| Status::unavailable(format!("gateway not ready: {}", e)))?;
        Ok(grpc)
    }
}

#[async_trait]
impl Transport for GrpcTransport {
    async fn unary(
        &self,
        kind: CommandKind,
        request: Bytes,
        timeout: Duration,
    ) -> Result<Bytes, Status> {
        let mut grpc = self.ready_client().await?;
        let mut request = tonic::Request::new(request);
        request.set_timeout(timeout);

        let path = PathAndQuery::from_static(kind.method_path());
        let response = grpc.unary(request, path, PassThroughCodec).await?;
        Ok(response.into_inner())
    }

    async fn server_streaming(
        &self,
        kind: CommandKind,
        request: Bytes,
    ) -> Result<ResponseStream, Status> {
        let mut grpc = self.ready_client().await?;
        let path = PathAndQuery::from_static(kind.method_path());
        let response = grpc
            .server_streaming(tonic::Request::new(request), path, PassThroughCodec)
            .await?;
        Ok(Box::pin(response.into_inner()))
    }

    async fn close(&self) {
        if self.channel.write().take().is_some() {
            debug!("Released gateway channel");
        }
    }
}
