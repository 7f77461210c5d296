//! Scriptable in-memory transport that records every request.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use parking_lot::Mutex;
use prost::Message;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::Status;
use zbc_core::{CommandKind, ResponseStream, Transport};

/// A request as it reached the transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub kind: CommandKind,
    pub body: Bytes,
    /// Deadline handed to a unary call, `None` for streams
    pub timeout: Option<Duration>,
}

impl RecordedRequest {
    /// Decode the body as the protocol request `M`.
    pub fn decode<M: Message + Default>(&self) -> Result<M, prost::DecodeError> {
        M::decode(self.body.clone())
    }
}

enum UnaryReply {
    Respond(Bytes),
    Fail(Status),
    Hang,
}

enum StreamScript {
    Items(Vec<Result<Bytes, Status>>),
    Channel(mpsc::Receiver<Result<Bytes, Status>>),
    Fail(Status),
    Hang,
}

#[derive(Default)]
struct State {
    unary: HashMap<CommandKind, VecDeque<UnaryReply>>,
    streams: VecDeque<StreamScript>,
    requests: Vec<RecordedRequest>,
    closed: bool,
}

/// In-memory [`Transport`] for tests.
///
/// Replies are scripted per command kind and consumed in order. A unary call
/// without a scripted reply answers with an empty message (the protocol
/// default of the response type), an unscripted stream completes without
/// items.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use zbc_sdk::testing::RecordingTransport;
/// use zbc_sdk::{ClientConfig, ZbcClient};
///
/// let transport = Arc::new(RecordingTransport::new());
/// transport.fail_with(CommandKind::CompleteJob, Status::unavailable("down"));
/// let client = ZbcClient::new(ClientConfig::default(), transport.clone())?;
/// ```
#[derive(Default)]
pub struct RecordingTransport {
    state: Mutex<State>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_unary(&self, kind: CommandKind, reply: UnaryReply) {
        self.state
            .lock()
            .unary
            .entry(kind)
            .or_default()
            .push_back(reply);
    }

    /// Answer the next `kind` call with `response`.
    pub fn respond_with<M: Message>(&self, kind: CommandKind, response: M) {
        self.push_unary(kind, UnaryReply::Respond(Bytes::from(response.encode_to_vec())));
    }

    /// Fail the next `kind` call with `status`.
    pub fn fail_with(&self, kind: CommandKind, status: Status) {
        self.push_unary(kind, UnaryReply::Fail(status));
    }

    /// Fail the next `times` calls of `kind` with copies of `status`.
    pub fn fail_times(&self, kind: CommandKind, status: Status, times: usize) {
        for _ in 0..times {
            self.fail_with(kind, Status::new(status.code(), status.message()));
        }
    }

    /// Never answer the next `kind` call.
    pub fn hang(&self, kind: CommandKind) {
        self.push_unary(kind, UnaryReply::Hang);
    }

    /// The next stream yields `responses` and completes.
    pub fn stream_responses<M: Message>(&self, responses: Vec<M>) {
        let items = responses
            .into_iter()
            .map(|m| Ok(Bytes::from(m.encode_to_vec())))
            .collect();
        self.state.lock().streams.push_back(StreamScript::Items(items));
    }

    /// The next stream yields `responses` and then fails with `status`.
    pub fn stream_then_fail<M: Message>(&self, responses: Vec<M>, status: Status) {
        let mut items: Vec<_> = responses
            .into_iter()
            .map(|m| Ok(Bytes::from(m.encode_to_vec())))
            .collect();
        items.push(Err(status));
        self.state.lock().streams.push_back(StreamScript::Items(items));
    }

    /// The next stream is fed by the returned sender; dropping it completes
    /// the stream.
    pub fn stream_channel(&self) -> StreamFeeder {
        let (tx, rx) = mpsc::channel(16);
        self.state.lock().streams.push_back(StreamScript::Channel(rx));
        StreamFeeder { tx }
    }

    /// Opening the next stream fails with `status`.
    pub fn fail_stream(&self, status: Status) {
        self.state.lock().streams.push_back(StreamScript::Fail(status));
    }

    /// Opening the next stream never returns.
    pub fn hang_stream(&self) {
        self.state.lock().streams.push_back(StreamScript::Hang);
    }

    /// All requests in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    /// Number of calls made for `kind`, retries included.
    pub fn call_count(&self, kind: CommandKind) -> usize {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| r.kind == kind)
            .count()
    }

    /// The most recent `kind` request, decoded.
    pub fn last_request<M: Message + Default>(&self, kind: CommandKind) -> Option<M> {
        let state = self.state.lock();
        let request = state.requests.iter().rev().find(|r| r.kind == kind)?;
        request.decode().ok()
    }

    /// Whether the transport was released.
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    fn record(&self, kind: CommandKind, body: Bytes, timeout: Option<Duration>) {
        self.state.lock().requests.push(RecordedRequest {
            kind,
            body,
            timeout,
        });
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn unary(
        &self,
        kind: CommandKind,
        request: Bytes,
        timeout: Duration,
    ) -> Result<Bytes, Status> {
        self.record(kind, request, Some(timeout));
        let reply = self
            .state
            .lock()
            .unary
            .get_mut(&kind)
            .and_then(VecDeque::pop_front);

        match reply {
            Some(UnaryReply::Respond(body)) => Ok(body),
            Some(UnaryReply::Fail(status)) => Err(status),
            Some(UnaryReply::Hang) => futures::future::pending().await,
            None => Ok(Bytes::new()),
        }
    }

    async fn server_streaming(
        &self,
        kind: CommandKind,
        request: Bytes,
    ) -> Result<ResponseStream, Status> {
        self.record(kind, request, None);
        let script = self.state.lock().streams.pop_front();

        match script {
            Some(StreamScript::Items(items)) => Ok(Box::pin(stream::iter(items))),
            Some(StreamScript::Channel(rx)) => Ok(Box::pin(ReceiverStream::new(rx))),
            Some(StreamScript::Fail(status)) => Err(status),
            Some(StreamScript::Hang) => futures::future::pending().await,
            None => Ok(Box::pin(stream::empty())),
        }
    }

    async fn close(&self) {
        self.state.lock().closed = true;
    }
}

/// Feeds a scripted stream opened by [`RecordingTransport::stream_channel`].
#[derive(Clone)]
pub struct StreamFeeder {
    tx: mpsc::Sender<Result<Bytes, Status>>,
}

impl StreamFeeder {
    /// Deliver `message` to the stream. Returns false once the stream is gone.
    pub async fn send<M: Message>(&self, message: M) -> bool {
        self.tx
            .send(Ok(Bytes::from(message.encode_to_vec())))
            .await
            .is_ok()
    }

    /// Break the stream with `status`.
    pub async fn fail(&self, status: Status) -> bool {
        self.tx.send(Err(status)).await.is_ok()
    }
}
