//! Dispatcher - applies the dispatch policy to transport calls

use crate::client::Transport;
use crate::command::{CommandKind, DispatchMode};
use crate::dispatch::policy::{DispatchOptions, DispatchPolicy};
use crate::dispatch::stream::InactivityStream;
use crate::error::{CloseReason, CoreError, CoreResult};
use bytes::Bytes;
use prost::Message;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Sends encoded commands through a [`Transport`], applying timeouts,
/// retries and the client's close signal.
///
/// One dispatcher is shared by a client and every command it creates.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    policy: DispatchPolicy,
    closed_tx: watch::Sender<bool>,
}

async fn wait_closed(mut closed: watch::Receiver<bool>) {
    if closed.wait_for(|closed| *closed).await.is_err() {
        std::future::pending::<()>().await;
    }
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, policy: DispatchPolicy) -> Self {
        let (closed_tx, _) = watch::channel(false);
        Self {
            transport,
            policy,
            closed_tx,
        }
    }

    pub fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    pub fn is_closed(&self) -> bool {
        *self.closed_tx.borrow()
    }

    /// Close the dispatcher and release the transport.
    ///
    /// Dispatches in flight fail with [`CoreError::Closed`]; open streams end
    /// with it. Calling this more than once is a no-op.
    pub async fn close(&self) {
        if self.closed_tx.send_replace(true) {
            return;
        }
        info!("Closing dispatcher");
        self.transport.close().await;
    }

    /// Dispatch a unary command and decode its response.
    pub async fn unary<Req, Resp>(
        &self,
        kind: CommandKind,
        request: &Req,
        options: DispatchOptions,
    ) -> CoreResult<Resp>
    where
        Req: Message,
        Resp: Message + Default,
    {
        let request = Bytes::from(request.encode_to_vec());
        let response = self.unary_raw(kind, request, options).await?;
        Ok(Resp::decode(response)?)
    }

    /// Dispatch an encoded unary command.
    ///
    /// Each attempt is bounded by the request timeout. Retryable failures are
    /// retried up to the configured count without extra backoff; the last
    /// failure surfaces once retries are exhausted.
    pub async fn unary_raw(
        &self,
        kind: CommandKind,
        request: Bytes,
        options: DispatchOptions,
    ) -> CoreResult<Bytes> {
        debug_assert_eq!(kind.dispatch_mode(), DispatchMode::Unary);
        if self.is_closed() {
            return Err(CoreError::Closed);
        }

        let policy = self.policy.with_options(&options);
        let closed = wait_closed(self.closed_tx.subscribe());
        tokio::pin!(closed);

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            debug!(command = %kind, attempt, "Dispatching command");

            let call = tokio::time::timeout(
                policy.request_timeout,
                self.transport
                    .unary(kind, request.clone(), policy.request_timeout),
            );

            let error = tokio::select! {
                biased;
                _ = &mut closed => return Err(CoreError::Closed),
                result = call => match result {
                    Ok(Ok(response)) => return Ok(response),
                    Ok(Err(status)) => CoreError::from(status),
                    Err(_) => CoreError::deadline_exceeded(policy.request_timeout),
                },
            };

            if attempt > policy.retries || !policy.is_retry_allowed(kind, &error) {
                if attempt > 1 {
                    warn!(command = %kind, attempts = attempt, error = %error, "Command failed after retries");
                }
                return Err(error);
            }

            warn!(command = %kind, attempt, error = %error, "Command failed, retrying");
        }
    }

    /// Open a server stream for `kind`.
    ///
    /// Never retried: a failure to open, or a broken stream later on, is
    /// surfaced to the caller, who decides whether to dispatch again.
    pub async fn open_stream<Req, Resp>(
        &self,
        kind: CommandKind,
        request: &Req,
        options: DispatchOptions,
    ) -> CoreResult<InactivityStream<Resp>>
    where
        Req: Message,
        Resp: Message + Default + 'static,
    {
        debug_assert_eq!(kind.dispatch_mode(), DispatchMode::Streaming);
        if self.is_closed() {
            return Err(CoreError::Closed);
        }

        let policy = self.policy.with_options(&options);
        let request = Bytes::from(request.encode_to_vec());
        let closed = wait_closed(self.closed_tx.subscribe());
        tokio::pin!(closed);

        let open = tokio::time::timeout(
            policy.stream_timeout,
            self.transport.server_streaming(kind, request),
        );

        let source = tokio::select! {
            biased;
            _ = &mut closed => return Err(CoreError::Closed),
            result = open => match result {
                Ok(Ok(source)) => source,
                Ok(Err(status)) => return Err(CoreError::from(status)),
                Err(_) => {
                    return Err(CoreError::StreamClosed(CloseReason::InactivityTimeout(
                        policy.stream_timeout,
                    )))
                }
            },
        };

        debug!(command = %kind, stream_timeout_ms = policy.stream_timeout.as_millis() as u64, "Opened response stream");
        Ok(InactivityStream::new(
            kind,
            source,
            policy.stream_timeout,
            self.closed_tx.subscribe(),
        ))
    }
}
