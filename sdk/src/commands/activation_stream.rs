//! Jobs of an ActivateJobs call, one at a time

use crate::error::{Result, ZbcError};
use crate::job::ActivatedJob;
use futures::{Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tracing::debug;
use zbc_core::protocol::gateway_protocol::ActivateJobsResponse;
use zbc_core::{CloseReason, CoreError, InactivityStream};

/// Stream of activated jobs.
///
/// A response may carry several jobs; all of them are delivered, in server
/// order, before the next response is pulled. The stream ends with exactly one
/// error item saying why: [`ZbcError::StreamClosed`] when the gateway
/// finished it or nothing arrived within the stream timeout,
/// [`ZbcError::Closed`] when the client was closed, or the transport error
/// that broke it. It never reopens itself.
pub struct ActivationStream {
    responses: Option<InactivityStream<ActivateJobsResponse>>,
    buffered: VecDeque<ActivatedJob>,
    close_reason: Option<CloseReason>,
    ended: Option<CoreError>,
    delivered: u64,
}

impl ActivationStream {
    pub(crate) fn new(responses: InactivityStream<ActivateJobsResponse>) -> Self {
        Self {
            responses: Some(responses),
            buffered: VecDeque::new(),
            close_reason: None,
            ended: None,
            delivered: 0,
        }
    }

    /// Next job, or the error that ended the stream.
    ///
    /// Once the stream has ended this keeps returning the error it ended
    /// with.
    pub async fn next_job(&mut self) -> Result<ActivatedJob> {
        match self.next().await {
            Some(item) => item,
            None => Err(self
                .ended
                .clone()
                .map(ZbcError::from)
                .unwrap_or(ZbcError::StreamClosed(CloseReason::Completed))),
        }
    }

    /// Release the underlying call. Jobs already received stay available.
    pub fn close(&mut self) {
        if self.responses.take().is_some() {
            debug!(delivered = self.delivered, "Activation stream closed by consumer");
            self.close_reason = Some(CloseReason::Completed);
            self.ended = Some(CoreError::StreamClosed(CloseReason::Completed));
        }
    }

    /// How the stream ended, once it has ended with [`ZbcError::StreamClosed`]
    /// or was closed by [`close`](Self::close).
    pub fn close_reason(&self) -> Option<CloseReason> {
        self.close_reason
    }

    /// Number of jobs handed to the consumer so far
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl Stream for ActivationStream {
    type Item = Result<ActivatedJob>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some(job) = this.buffered.pop_front() {
                this.delivered += 1;
                return Poll::Ready(Some(Ok(job)));
            }

            let Some(responses) = this.responses.as_mut() else {
                return Poll::Ready(None);
            };

            match ready!(responses.poll_next_unpin(cx)) {
                Some(Ok(response)) => {
                    this.buffered
                        .extend(response.jobs.into_iter().map(ActivatedJob::from));
                }
                Some(Err(error)) => {
                    this.responses = None;
                    this.ended = Some(error.clone());
                    let error = ZbcError::from(error);
                    this.close_reason = error.close_reason();
                    return Poll::Ready(Some(Err(error)));
                }
                None => {
                    this.responses = None;
                    return Poll::Ready(None);
                }
            }
        }
    }
}
