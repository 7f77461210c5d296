//! Command kinds understood by the gateway.

use std::fmt;

/// How a command travels over the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchMode {
    /// Single request, single response.
    Unary,
    /// Single request, open-ended sequence of responses.
    Streaming,
}

/// Tag of every command the client can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Topology,
    Deploy,
    CreateInstance,
    CancelInstance,
    UpdatePayload,
    PublishMessage,
    CreateJob,
    ActivateJobs,
    CompleteJob,
    FailJob,
    UpdateJobRetries,
}

impl CommandKind {
    /// All kinds, in declaration order.
    pub const ALL: [CommandKind; 11] = [
        Self::Topology,
        Self::Deploy,
        Self::CreateInstance,
        Self::CancelInstance,
        Self::UpdatePayload,
        Self::PublishMessage,
        Self::CreateJob,
        Self::ActivateJobs,
        Self::CompleteJob,
        Self::FailJob,
        Self::UpdateJobRetries,
    ];

    /// gRPC method path on the gateway service.
    pub fn method_path(&self) -> &'static str {
        match self {
            Self::Topology => "/gateway_protocol.Gateway/Topology",
            Self::Deploy => "/gateway_protocol.Gateway/DeployWorkflow",
            Self::CreateInstance => "/gateway_protocol.Gateway/CreateWorkflowInstance",
            Self::CancelInstance => "/gateway_protocol.Gateway/CancelWorkflowInstance",
            Self::UpdatePayload => "/gateway_protocol.Gateway/UpdateWorkflowInstancePayload",
            Self::PublishMessage => "/gateway_protocol.Gateway/PublishMessage",
            Self::CreateJob => "/gateway_protocol.Gateway/CreateJob",
            Self::ActivateJobs => "/gateway_protocol.Gateway/ActivateJobs",
            Self::CompleteJob => "/gateway_protocol.Gateway/CompleteJob",
            Self::FailJob => "/gateway_protocol.Gateway/FailJob",
            Self::UpdateJobRetries => "/gateway_protocol.Gateway/UpdateJobRetries",
        }
    }

    pub fn dispatch_mode(&self) -> DispatchMode {
        match self {
            Self::ActivateJobs => DispatchMode::Streaming,
            _ => DispatchMode::Unary,
        }
    }

    /// Whether sending the same command twice leaves the engine in the same
    /// state as sending it once.
    ///
    /// Deployments, instance creation, message publication and job creation
    /// each produce a new record per request.
    pub fn is_idempotent(&self) -> bool {
        !matches!(
            self,
            Self::Deploy | Self::CreateInstance | Self::PublishMessage | Self::CreateJob
        )
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.method_path();
        let name = path.rsplit('/').next().unwrap_or(path);
        f.write_str(name)
    }
}
