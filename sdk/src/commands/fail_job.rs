//! Report a failed job

use super::{dispatch_unary, require_key, require_retries, Command};
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;
use zbc_core::protocol::gateway_protocol::{FailJobRequest, FailJobResponse};
use zbc_core::{DispatchOptions, Dispatcher};

pub struct FailJobCommandStep1 {
    dispatcher: Arc<Dispatcher>,
}

impl FailJobCommandStep1 {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn job_key(self, key: i64) -> FailJobCommandStep2 {
        FailJobCommandStep2 {
            dispatcher: self.dispatcher,
            job_key: key,
        }
    }
}

/// The remaining retries are mandatory; 0 raises an incident.
pub struct FailJobCommandStep2 {
    dispatcher: Arc<Dispatcher>,
    job_key: i64,
}

impl FailJobCommandStep2 {
    pub fn retries(self, retries: i32) -> FailJobCommand {
        FailJobCommand {
            dispatcher: self.dispatcher,
            job_key: self.job_key,
            retries,
            error_message: String::new(),
            options: DispatchOptions::new(),
        }
    }
}

pub struct FailJobCommand {
    dispatcher: Arc<Dispatcher>,
    job_key: i64,
    retries: i32,
    error_message: String,
    options: DispatchOptions,
}

impl FailJobCommand {
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Override the client's request timeout for this dispatch
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_request_timeout(timeout);
        self
    }

    pub fn command(&self) -> Result<Command> {
        require_key("job key", self.job_key)?;
        require_retries(self.retries)?;
        Ok(Command::FailJob(FailJobRequest {
            job_key: self.job_key,
            retries: self.retries,
            error_message: self.error_message.clone(),
        }))
    }

    pub async fn send(self) -> Result<()> {
        let command = self.command()?;
        let _: FailJobResponse = dispatch_unary(&self.dispatcher, command, self.options).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::error::ZbcError;
    use zbc_core::CommandKind;

    #[tokio::test]
    async fn test_fail_job_with_message() {
        let (transport, dispatcher) = test_support::dispatcher();

        FailJobCommandStep1::new(dispatcher)
            .job_key(2251799813685253)
            .retries(2)
            .error_message("card declined")
            .send()
            .await
            .unwrap();

        let request: FailJobRequest = transport.last_request(CommandKind::FailJob).unwrap();
        assert_eq!(request.job_key, 2251799813685253);
        assert_eq!(request.retries, 2);
        assert_eq!(request.error_message, "card declined");
    }

    #[test]
    fn test_negative_retries_fail_validation() {
        let (_, dispatcher) = test_support::dispatcher();
        let result = FailJobCommandStep1::new(dispatcher)
            .job_key(1)
            .retries(-3)
            .command();
        assert!(matches!(result, Err(ZbcError::Validation(_))));
    }
}
