//! Type-state command builders
//!
//! Every command family is a chain of step types. Each step only offers the
//! methods that are legal at that point, so a command missing a mandatory
//! field can't be written down. Cross-field rules the types can't express
//! (non-empty names, positive keys) are checked by `send`, which consumes the
//! final step and dispatches at most once.
//!
//! ```ignore
//! let instance = client
//!     .new_create_instance_command()
//!     .bpmn_process_id("order-process")
//!     .latest_version()
//!     .payload(r#"{"orderId": 31243}"#)
//!     .send()
//!     .await?;
//! ```
//!
//! Skipping a mandatory step doesn't compile:
//!
//! ```compile_fail
//! # async fn skip_version(client: zbc_sdk::ZbcClient) {
//! client
//!     .new_create_instance_command()
//!     .bpmn_process_id("order-process")
//!     .send()
//!     .await;
//! # }
//! ```

mod activate_jobs;
mod activation_stream;
mod cancel_instance;
mod complete_job;
mod create_instance;
mod create_job;
mod deploy;
mod fail_job;
mod publish_message;
mod topology;
mod update_job_retries;
mod update_payload;

pub use activate_jobs::{
    ActivateJobsCommand, ActivateJobsCommandStep1, ActivateJobsCommandStep2,
};
pub use activation_stream::ActivationStream;
pub use cancel_instance::{CancelInstanceCommand, CancelInstanceCommandStep1};
pub use complete_job::{CompleteJobCommand, CompleteJobCommandStep1};
pub use create_instance::{
    CreateInstanceCommand, CreateInstanceCommandStep1, CreateInstanceCommandStep2,
    WorkflowInstance,
};
pub use create_job::{CreateJobCommand, CreateJobCommandStep1, CreatedJob};
pub use deploy::{
    resource_type_for, DeployWorkflowCommand, DeployWorkflowCommandStep1, DeployedWorkflow,
    DeploymentResult, ResourceType,
};
pub use fail_job::{FailJobCommand, FailJobCommandStep1, FailJobCommandStep2};
pub use publish_message::{
    PublishMessageCommand, PublishMessageCommandStep1, PublishMessageCommandStep2,
};
pub use topology::{BrokerInfo, PartitionBrokerRole, PartitionInfo, Topology, TopologyCommand};
pub use update_job_retries::{
    UpdateJobRetriesCommand, UpdateJobRetriesCommandStep1, UpdateJobRetriesCommandStep2,
};
pub use update_payload::{
    UpdatePayloadCommand, UpdatePayloadCommandStep1, UpdatePayloadCommandStep2,
};

pub(crate) use activate_jobs::ActivationDefaults;

use crate::error::{Result, ZbcError};
use bytes::Bytes;
use prost::Message;
use zbc_core::protocol::gateway_protocol::{
    ActivateJobsRequest, CancelWorkflowInstanceRequest, CompleteJobRequest,
    CreateJobRequest, CreateWorkflowInstanceRequest, DeployWorkflowRequest, FailJobRequest,
    PublishMessageRequest, TopologyRequest, UpdateJobRetriesRequest,
    UpdateWorkflowInstancePayloadRequest,
};
use zbc_core::{CommandKind, DispatchOptions, Dispatcher};

/// Workflow version that selects the latest deployed version
pub const LATEST_VERSION: i32 = -1;
/// Payload sent when a command that carries one doesn't set it
pub const EMPTY_PAYLOAD: &str = "{}";
/// Retries of a created job, and of a job whose retries are reset without a count
pub const DEFAULT_JOB_RETRIES: i32 = 3;

/// A fully assembled command, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Topology(TopologyRequest),
    Deploy(DeployWorkflowRequest),
    CreateInstance(CreateWorkflowInstanceRequest),
    CancelInstance(CancelWorkflowInstanceRequest),
    UpdatePayload(UpdateWorkflowInstancePayloadRequest),
    PublishMessage(PublishMessageRequest),
    CreateJob(CreateJobRequest),
    ActivateJobs(ActivateJobsRequest),
    CompleteJob(CompleteJobRequest),
    FailJob(FailJobRequest),
    UpdateJobRetries(UpdateJobRetriesRequest),
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Topology(_) => CommandKind::Topology,
            Command::Deploy(_) => CommandKind::Deploy,
            Command::CreateInstance(_) => CommandKind::CreateInstance,
            Command::CancelInstance(_) => CommandKind::CancelInstance,
            Command::UpdatePayload(_) => CommandKind::UpdatePayload,
            Command::PublishMessage(_) => CommandKind::PublishMessage,
            Command::CreateJob(_) => CommandKind::CreateJob,
            Command::ActivateJobs(_) => CommandKind::ActivateJobs,
            Command::CompleteJob(_) => CommandKind::CompleteJob,
            Command::FailJob(_) => CommandKind::FailJob,
            Command::UpdateJobRetries(_) => CommandKind::UpdateJobRetries,
        }
    }

    /// Protobuf encoding of the wrapped request
    pub fn encode(&self) -> Bytes {
        let body = match self {
            Command::Topology(r) => r.encode_to_vec(),
            Command::Deploy(r) => r.encode_to_vec(),
            Command::CreateInstance(r) => r.encode_to_vec(),
            Command::CancelInstance(r) => r.encode_to_vec(),
            Command::UpdatePayload(r) => r.encode_to_vec(),
            Command::PublishMessage(r) => r.encode_to_vec(),
            Command::CreateJob(r) => r.encode_to_vec(),
            Command::ActivateJobs(r) => r.encode_to_vec(),
            Command::CompleteJob(r) => r.encode_to_vec(),
            Command::FailJob(r) => r.encode_to_vec(),
            Command::UpdateJobRetries(r) => r.encode_to_vec(),
        };
        Bytes::from(body)
    }
}

/// Dispatch a unary command and decode its response.
pub(crate) async fn dispatch_unary<Resp>(
    dispatcher: &Dispatcher,
    command: Command,
    options: DispatchOptions,
) -> Result<Resp>
where
    Resp: Message + Default,
{
    let response = dispatcher
        .unary_raw(command.kind(), command.encode(), options)
        .await?;
    Ok(Resp::decode(response)?)
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ZbcError::validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

pub(crate) fn require_key(field: &str, key: i64) -> Result<()> {
    if key <= 0 {
        return Err(ZbcError::validation(format!(
            "{} must be positive, got {}",
            field, key
        )));
    }
    Ok(())
}

pub(crate) fn require_retries(retries: i32) -> Result<()> {
    if retries < 0 {
        return Err(ZbcError::validation(format!(
            "retries must not be negative, got {}",
            retries
        )));
    }
    Ok(())
}
