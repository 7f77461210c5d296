//! Complete an activated job

use super::{dispatch_unary, require_key, Command};
use crate::error::Result;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use zbc_core::protocol::gateway_protocol::{CompleteJobRequest, CompleteJobResponse};
use zbc_core::{DispatchOptions, Dispatcher};

pub struct CompleteJobCommandStep1 {
    dispatcher: Arc<Dispatcher>,
}

impl CompleteJobCommandStep1 {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn job_key(self, key: i64) -> CompleteJobCommand {
        CompleteJobCommand {
            dispatcher: self.dispatcher,
            job_key: key,
            payload: String::new(),
            options: DispatchOptions::new(),
        }
    }
}

pub struct CompleteJobCommand {
    dispatcher: Arc<Dispatcher>,
    job_key: i64,
    payload: String,
    options: DispatchOptions,
}

impl CompleteJobCommand {
    /// Payload merged into the instance. Without it the instance payload is
    /// left as it is.
    pub fn payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn payload_value(self, payload: &Value) -> Self {
        self.payload(payload.to_string())
    }

    /// Override the client's request timeout for this dispatch
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_request_timeout(timeout);
        self
    }

    pub fn command(&self) -> Result<Command> {
        require_key("job key", self.job_key)?;
        Ok(Command::CompleteJob(CompleteJobRequest {
            job_key: self.job_key,
            payload: self.payload.clone(),
        }))
    }

    pub async fn send(self) -> Result<()> {
        let command = self.command()?;
        let _: CompleteJobResponse =
            dispatch_unary(&self.dispatcher, command, self.options).await?;
        Ok(())
    }
}
