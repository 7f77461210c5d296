//! Deploy workflow resources

use super::{dispatch_unary, Command};
use crate::error::{Result, ZbcError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use zbc_core::protocol::gateway_protocol::{
    DeployWorkflowRequest, DeployWorkflowResponse, WorkflowRequestObject,
};
use zbc_core::protocol::{RESOURCE_TYPE_BPMN, RESOURCE_TYPE_YAML};
use zbc_core::{DispatchOptions, Dispatcher};

/// Format of a workflow resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Bpmn,
    Yaml,
}

impl ResourceType {
    fn wire_value(self) -> i32 {
        match self {
            ResourceType::Bpmn => RESOURCE_TYPE_BPMN,
            ResourceType::Yaml => RESOURCE_TYPE_YAML,
        }
    }
}

/// Resource type implied by the file extension of `resource_name`.
pub fn resource_type_for(resource_name: &str) -> Result<ResourceType> {
    if resource_name.ends_with(".bpmn") || resource_name.ends_with(".bpmn20.xml") {
        Ok(ResourceType::Bpmn)
    } else if resource_name.ends_with(".yaml") || resource_name.ends_with(".yml") {
        Ok(ResourceType::Yaml)
    } else {
        Err(ZbcError::validation(format!(
            "cannot resolve type of resource '{}': expected .bpmn, .bpmn20.xml, .yaml or .yml",
            resource_name
        )))
    }
}

/// Outcome of a deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResult {
    pub key: i64,
    pub workflows: Vec<DeployedWorkflow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedWorkflow {
    pub bpmn_process_id: String,
    pub version: i32,
    pub workflow_key: i64,
    pub resource_name: String,
}

impl From<DeployWorkflowResponse> for DeploymentResult {
    fn from(response: DeployWorkflowResponse) -> Self {
        Self {
            key: response.key,
            workflows: response
                .workflows
                .into_iter()
                .map(|w| DeployedWorkflow {
                    bpmn_process_id: w.bpmn_process_id,
                    version: w.version,
                    workflow_key: w.workflow_key,
                    resource_name: w.resource_name,
                })
                .collect(),
        }
    }
}

enum Resource {
    Inline { name: String, content: Vec<u8> },
    File(PathBuf),
}

/// First step: at least one resource is required.
pub struct DeployWorkflowCommandStep1 {
    dispatcher: Arc<Dispatcher>,
}

impl DeployWorkflowCommandStep1 {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    fn into_command(self) -> DeployWorkflowCommand {
        DeployWorkflowCommand {
            dispatcher: self.dispatcher,
            resources: Vec::new(),
            options: DispatchOptions::new(),
        }
    }

    /// Add a resource from memory. The name decides the resource type.
    pub fn add_resource(
        self,
        name: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> DeployWorkflowCommand {
        self.into_command().add_resource(name, content)
    }

    /// Add a resource from a UTF-8 string.
    pub fn add_resource_string(
        self,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> DeployWorkflowCommand {
        self.into_command().add_resource_string(name, content)
    }

    /// Add a resource file, read when the command is sent.
    pub fn add_resource_file(self, path: impl AsRef<Path>) -> DeployWorkflowCommand {
        self.into_command().add_resource_file(path)
    }
}

/// Deployment with at least one resource.
pub struct DeployWorkflowCommand {
    dispatcher: Arc<Dispatcher>,
    resources: Vec<Resource>,
    options: DispatchOptions,
}

impl DeployWorkflowCommand {
    pub fn add_resource(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.resources.push(Resource::Inline {
            name: name.into(),
            content: content.into(),
        });
        self
    }

    pub fn add_resource_string(self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.add_resource(name, content.into().into_bytes())
    }

    pub fn add_resource_file(mut self, path: impl AsRef<Path>) -> Self {
        self.resources
            .push(Resource::File(path.as_ref().to_path_buf()));
        self
    }

    /// Override the client's request timeout for this dispatch
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_request_timeout(timeout);
        self
    }

    /// Assemble the command, reading resource files.
    ///
    /// Every resource type is resolved before any file is read.
    pub async fn command(&self) -> Result<Command> {
        let mut names = Vec::with_capacity(self.resources.len());
        for resource in &self.resources {
            let name = match resource {
                Resource::Inline { name, .. } => name.clone(),
                Resource::File(path) => path.to_string_lossy().into_owned(),
            };
            let resource_type = resource_type_for(&name)?;
            names.push((name, resource_type));
        }

        let mut workflows = Vec::with_capacity(self.resources.len());
        for (resource, (name, resource_type)) in self.resources.iter().zip(names) {
            let definition = match resource {
                Resource::Inline { content, .. } => content.clone(),
                Resource::File(path) => tokio::fs::read(path).await?,
            };
            debug!(resource = %name, bytes = definition.len(), "Adding deployment resource");
            workflows.push(WorkflowRequestObject {
                name,
                r#type: resource_type.wire_value(),
                definition,
            });
        }

        Ok(Command::Deploy(DeployWorkflowRequest { workflows }))
    }

    pub async fn send(self) -> Result<DeploymentResult> {
        let command = self.command().await?;
        let response: DeployWorkflowResponse =
            dispatch_unary(&self.dispatcher, command, self.options).await?;
        Ok(response.into())
    }
}
