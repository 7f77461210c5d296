//! Create a standalone job

use super::{
    dispatch_unary, require_non_empty, require_retries, Command, DEFAULT_JOB_RETRIES,
    EMPTY_PAYLOAD,
};
use crate::error::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use zbc_core::protocol::gateway_protocol::{CreateJobRequest, CreateJobResponse};
use zbc_core::{DispatchOptions, Dispatcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedJob {
    pub key: i64,
    pub partition_id: i32,
}

pub struct CreateJobCommandStep1 {
    dispatcher: Arc<Dispatcher>,
}

impl CreateJobCommandStep1 {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn job_type(self, job_type: impl Into<String>) -> CreateJobCommand {
        CreateJobCommand {
            dispatcher: self.dispatcher,
            job_type: job_type.into(),
            retries: DEFAULT_JOB_RETRIES,
            custom_headers: Map::new(),
            payload: EMPTY_PAYLOAD.to_string(),
            options: DispatchOptions::new(),
        }
    }
}

pub struct CreateJobCommand {
    dispatcher: Arc<Dispatcher>,
    job_type: String,
    retries: i32,
    custom_headers: Map<String, Value>,
    payload: String,
    options: DispatchOptions,
}

impl CreateJobCommand {
    pub fn retries(mut self, retries: i32) -> Self {
        self.retries = retries;
        self
    }

    /// Add a custom header; a later header with the same key replaces it.
    pub fn add_custom_header(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom_headers.insert(key.into(), value.into());
        self
    }

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
        require_non_empty("job type", &self.job_type)?;
        require_retries(self.retries)?;

        Ok(Command::CreateJob(CreateJobRequest {
            job_type: self.job_type.clone(),
            retries: self.retries,
            custom_headers: serde_json::to_string(&self.custom_headers)?,
            payload: self.payload.clone(),
        }))
    }

    pub async fn send(self) -> Result<CreatedJob> {
        let command = self.command()?;
        let response: CreateJobResponse =
            dispatch_unary(&self.dispatcher, command, self.options).await?;
        Ok(CreatedJob {
            key: response.key,
            partition_id: response.partition_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::error::ZbcError;
    use zbc_core::CommandKind;

    #[tokio::test]
    async fn test_create_job_defaults() {
        let (transport, dispatcher) = test_support::dispatcher();
        transport.respond_with(
            CommandKind::CreateJob,
            CreateJobResponse {
                key: 2251799813685249,
                partition_id: 1,
            },
        );

        let job = CreateJobCommandStep1::new(dispatcher)
            .job_type("payment")
            .send()
            .await
            .unwrap();

        assert_eq!(job.key, 2251799813685249);
        let request: CreateJobRequest = transport.last_request(CommandKind::CreateJob).unwrap();
        assert_eq!(request.job_type, "payment");
        assert_eq!(request.retries, 3);
        assert_eq!(request.custom_headers, "{}");
        assert_eq!(request.payload, "{}");
    }

    #[test]
    fn test_custom_headers_are_serialized_as_json() {
        let (_, dispatcher) = test_support::dispatcher();
        let command = CreateJobCommandStep1::new(dispatcher)
            .job_type("payment")
            .retries(5)
            .add_custom_header("method", "VISA")
            .add_custom_header("attempt", 2)
            .command()
            .unwrap();

        let Command::CreateJob(request) = command else {
            panic!("expected a create job command");
        };
        assert_eq!(request.retries, 5);
        let headers: Value = serde_json::from_str(&request.custom_headers).unwrap();
        assert_eq!(headers["method"], "VISA");
        assert_eq!(headers["attempt"], 2);
    }

    #[test]
    fn test_negative_retries_fail_validation() {
        let (_, dispatcher) = test_support::dispatcher();
        let result = CreateJobCommandStep1::new(dispatcher)
            .job_type("payment")
            .retries(-1)
            .command();
        assert!(matches!(result, Err(ZbcError::Validation(_))));
    }
}
