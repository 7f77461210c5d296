//! Set the remaining retries of a job

use super::{dispatch_unary, require_key, require_retries, Command, DEFAULT_JOB_RETRIES};
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;
use zbc_core::protocol::gateway_protocol::{UpdateJobRetriesRequest, UpdateJobRetriesResponse};
use zbc_core::{DispatchOptions, Dispatcher};

pub struct UpdateJobRetriesCommandStep1 {
    dispatcher: Arc<Dispatcher>,
}

impl UpdateJobRetriesCommandStep1 {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn job_key(self, key: i64) -> UpdateJobRetriesCommandStep2 {
        UpdateJobRetriesCommandStep2 {
            dispatcher: self.dispatcher,
            job_key: key,
        }
    }
}

pub struct UpdateJobRetriesCommandStep2 {
    dispatcher: Arc<Dispatcher>,
    job_key: i64,
}

impl UpdateJobRetriesCommandStep2 {
    pub fn retries(self, retries: i32) -> UpdateJobRetriesCommand {
        UpdateJobRetriesCommand {
            dispatcher: self.dispatcher,
            job_key: self.job_key,
            retries,
            options: DispatchOptions::new(),
        }
    }

    /// Send with the default of 3 retries.
    pub async fn send(self) -> Result<()> {
        self.retries(DEFAULT_JOB_RETRIES).send().await
    }
}

pub struct UpdateJobRetriesCommand {
    dispatcher: Arc<Dispatcher>,
    job_key: i64,
    retries: i32,
    options: DispatchOptions,
}

impl UpdateJobRetriesCommand {
    /// Override the client's request timeout for this dispatch
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_request_timeout(timeout);
        self
    }

    pub fn command(&self) -> Result<Command> {
        require_key("job key", self.job_key)?;
        require_retries(self.retries)?;
        Ok(Command::UpdateJobRetries(UpdateJobRetriesRequest {
            job_key: self.job_key,
            retries: self.retries,
        }))
    }

    pub async fn send(self) -> Result<()> {
        let command = self.command()?;
        let _: UpdateJobRetriesResponse =
            dispatch_unary(&self.dispatcher, command, self.options).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use zbc_core::CommandKind;

    #[tokio::test]
    async fn test_default_retries() {
        let (transport, dispatcher) = test_support::dispatcher();

        UpdateJobRetriesCommandStep1::new(dispatcher)
            .job_key(2251799813685253)
            .send()
            .await
            .unwrap();

        let request: UpdateJobRetriesRequest =
            transport.last_request(CommandKind::UpdateJobRetries).unwrap();
        assert_eq!(request.retries, 3);
    }

    #[tokio::test]
    async fn test_zero_retries_is_allowed() {
        let (transport, dispatcher) = test_support::dispatcher();

        UpdateJobRetriesCommandStep1::new(dispatcher)
            .job_key(9)
            .retries(0)
            .send()
            .await
            .unwrap();

        let request: UpdateJobRetriesRequest =
            transport.last_request(CommandKind::UpdateJobRetries).unwrap();
        assert_eq!(request.job_key, 9);
        assert_eq!(request.retries, 0);
    }
}
