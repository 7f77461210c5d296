//! Create a workflow instance

use super::{dispatch_unary, require_key, require_non_empty, Command, EMPTY_PAYLOAD, LATEST_VERSION};
use crate::error::{Result, ZbcError};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use zbc_core::protocol::gateway_protocol::{
    CreateWorkflowInstanceRequest, CreateWorkflowInstanceResponse,
};
use zbc_core::{DispatchOptions, Dispatcher};

/// A newly created workflow instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowInstance {
    pub workflow_key: i64,
    pub bpmn_process_id: String,
    pub version: i32,
    pub partition_id: i32,
    pub workflow_instance_key: i64,
}

impl From<CreateWorkflowInstanceResponse> for WorkflowInstance {
    fn from(response: CreateWorkflowInstanceResponse) -> Self {
        Self {
            workflow_key: response.workflow_key,
            bpmn_process_id: response.bpmn_process_id,
            version: response.version,
            partition_id: response.partition_id,
            workflow_instance_key: response.workflow_instance_key,
        }
    }
}

#[derive(Debug, Clone)]
enum WorkflowTarget {
    ProcessId { bpmn_process_id: String, version: i32 },
    Key(i64),
}

/// Choose the workflow, by process id or by key.
pub struct CreateInstanceCommandStep1 {
    dispatcher: Arc<Dispatcher>,
}

impl CreateInstanceCommandStep1 {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Select the workflow by the id of its BPMN process; a version follows.
    pub fn bpmn_process_id(self, id: impl Into<String>) -> CreateInstanceCommandStep2 {
        CreateInstanceCommandStep2 {
            dispatcher: self.dispatcher,
            bpmn_process_id: id.into(),
        }
    }

    /// Select the workflow by the key it got at deployment.
    pub fn workflow_key(self, key: i64) -> CreateInstanceCommand {
        CreateInstanceCommand::new(self.dispatcher, WorkflowTarget::Key(key))
    }
}

/// Choose the version of the selected process.
pub struct CreateInstanceCommandStep2 {
    dispatcher: Arc<Dispatcher>,
    bpmn_process_id: String,
}

impl CreateInstanceCommandStep2 {
    pub fn version(self, version: i32) -> CreateInstanceCommand {
        CreateInstanceCommand::new(
            self.dispatcher,
            WorkflowTarget::ProcessId {
                bpmn_process_id: self.bpmn_process_id,
                version,
            },
        )
    }

    pub fn latest_version(self) -> CreateInstanceCommand {
        self.version(LATEST_VERSION)
    }
}

/// Instance creation with its workflow selected.
pub struct CreateInstanceCommand {
    dispatcher: Arc<Dispatcher>,
    target: WorkflowTarget,
    payload: String,
    options: DispatchOptions,
}

impl CreateInstanceCommand {
    fn new(dispatcher: Arc<Dispatcher>, target: WorkflowTarget) -> Self {
        Self {
            dispatcher,
            target,
            payload: EMPTY_PAYLOAD.to_string(),
            options: DispatchOptions::new(),
        }
    }

    /// Initial payload as a JSON document
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
        let request = match &self.target {
            WorkflowTarget::ProcessId {
                bpmn_process_id,
                version,
            } => {
                require_non_empty("bpmn process id", bpmn_process_id)?;
                if *version < LATEST_VERSION {
                    return Err(ZbcError::validation(format!(
                        "version must be positive or {} for the latest version, got {}",
                        LATEST_VERSION, version
                    )));
                }
                CreateWorkflowInstanceRequest {
                    workflow_key: 0,
                    bpmn_process_id: bpmn_process_id.clone(),
                    version: *version,
                    payload: self.payload.clone(),
                }
            }
            WorkflowTarget::Key(key) => {
                require_key("workflow key", *key)?;
                CreateWorkflowInstanceRequest {
                    workflow_key: *key,
                    bpmn_process_id: String::new(),
                    version: 0,
                    payload: self.payload.clone(),
                }
            }
        };
        Ok(Command::CreateInstance(request))
    }

    pub async fn send(self) -> Result<WorkflowInstance> {
        let command = self.command()?;
        let response: CreateWorkflowInstanceResponse =
            dispatch_unary(&self.dispatcher, command, self.options).await?;
        Ok(response.into())
    }
}
