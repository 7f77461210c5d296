//! Response stream with an inactivity timeout

use crate::client::ResponseStream;
use crate::command::CommandKind;
use crate::error::{CloseReason, CoreError, CoreResult};
use futures::stream::{self, Stream, StreamExt};
use prost::Message;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Decoded messages of a server-streaming call.
///
/// Every pull waits at most `stream_timeout` for the next message, so a
/// stream that keeps receiving stays open indefinitely. The stream ends with
/// exactly one terminal error item:
///
/// * `StreamClosed(Completed)` when the transport finished the stream,
/// * `StreamClosed(InactivityTimeout)` when nothing arrived in time,
/// * `Closed` when the owning client was closed,
/// * the classified transport error otherwise.
///
/// Dropping the stream releases the underlying call.
pub struct InactivityStream<M> {
    inner: Pin<Box<dyn Stream<Item = CoreResult<M>> + Send>>,
    _message: PhantomData<fn() -> M>,
}

struct PullState {
    kind: CommandKind,
    source: Option<ResponseStream>,
    closed: watch::Receiver<bool>,
    timeout: Duration,
    received: u64,
}

/// Resolves once the dispatcher is closed. A dropped dispatcher never closes,
/// so the stream outlives the client handles.
async fn wait_closed(closed: &mut watch::Receiver<bool>) {
    if closed.wait_for(|closed| *closed).await.is_err() {
        std::future::pending::<()>().await;
    }
}

impl<M> InactivityStream<M>
where
    M: Message + Default + 'static,
{
    pub(crate) fn new(
        kind: CommandKind,
        source: ResponseStream,
        timeout: Duration,
        closed: watch::Receiver<bool>,
    ) -> Self {
        let state = PullState {
            kind,
            source: Some(source),
            closed,
            timeout,
            received: 0,
        };

        let inner = stream::unfold(state, |mut state| async move {
            let source = state.source.as_mut()?;

            let pulled = tokio::select! {
                biased;
                _ = wait_closed(&mut state.closed) => Err(CoreError::Closed),
                next = tokio::time::timeout(state.timeout, source.next()) => match next {
                    Ok(Some(Ok(bytes))) => M::decode(bytes).map_err(CoreError::from),
                    Ok(Some(Err(status))) => Err(CoreError::from(status)),
                    Ok(None) => Err(CoreError::StreamClosed(CloseReason::Completed)),
                    Err(_) => Err(CoreError::StreamClosed(CloseReason::InactivityTimeout(
                        state.timeout,
                    ))),
                },
            };

            match &pulled {
                Ok(_) => state.received += 1,
                Err(CoreError::StreamClosed(CloseReason::Completed)) => {
                    debug!(command = %state.kind, received = state.received, "Response stream completed");
                    state.source = None;
                }
                Err(error) => {
                    warn!(command = %state.kind, received = state.received, error = %error, "Response stream ended");
                    state.source = None;
                }
            }

            Some((pulled, state))
        });

        Self {
            inner: Box::pin(inner),
            _message: PhantomData,
        }
    }
}

impl<M> Stream for InactivityStream<M> {
    type Item = CoreResult<M>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
