//! ZbcClient - entry point for commands against a Zeebe gateway

use super::builder::ZbcClientBuilder;
use crate::commands::{
    ActivateJobsCommandStep1, ActivationDefaults, CancelInstanceCommandStep1,
    CompleteJobCommandStep1, CreateInstanceCommandStep1, CreateJobCommandStep1,
    DeployWorkflowCommandStep1, FailJobCommandStep1, PublishMessageCommandStep1,
    TopologyCommand, UpdateJobRetriesCommandStep1, UpdatePayloadCommandStep1,
};
use crate::config::ClientConfig;
use crate::error::Result;
use std::sync::Arc;
use tracing::info;
use zbc_core::{Dispatcher, Transport};

/// Client for a Zeebe gateway.
///
/// A factory for commands plus the owner of the connection they share.
/// Cloning is cheap and every clone uses the same connection; closing one
/// clone closes them all.
#[derive(Clone)]
pub struct ZbcClient {
    dispatcher: Arc<Dispatcher>,
    config: Arc<ClientConfig>,
}

impl ZbcClient {
    /// Create a new builder for ZbcClient
    pub fn builder() -> ZbcClientBuilder {
        ZbcClientBuilder::new()
    }

    /// Create a client over an existing transport
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let dispatcher = Dispatcher::new(transport, config.dispatch_policy());

        info!(
            gateway = %config.address(),
            request_timeout_ms = config.request_timeout.as_millis() as u64,
            retries = config.retries,
            "Created Zeebe client"
        );

        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn new_topology_command(&self) -> TopologyCommand {
        TopologyCommand::new(self.dispatcher.clone())
    }

    pub fn new_deploy_workflow_command(&self) -> DeployWorkflowCommandStep1 {
        DeployWorkflowCommandStep1::new(self.dispatcher.clone())
    }

    pub fn new_create_instance_command(&self) -> CreateInstanceCommandStep1 {
        CreateInstanceCommandStep1::new(self.dispatcher.clone())
    }

    pub fn new_cancel_instance_command(&self) -> CancelInstanceCommandStep1 {
        CancelInstanceCommandStep1::new(self.dispatcher.clone())
    }

    pub fn new_update_payload_command(&self) -> UpdatePayloadCommandStep1 {
        UpdatePayloadCommandStep1::new(self.dispatcher.clone())
    }

    pub fn new_publish_message_command(&self) -> PublishMessageCommandStep1 {
        PublishMessageCommandStep1::new(self.dispatcher.clone())
    }

    pub fn new_create_job_command(&self) -> CreateJobCommandStep1 {
        CreateJobCommandStep1::new(self.dispatcher.clone())
    }

    /// Job activation; worker name and job timeout default to the client's
    /// configuration.
    pub fn new_activate_jobs_command(&self) -> ActivateJobsCommandStep1 {
        ActivateJobsCommandStep1::new(
            self.dispatcher.clone(),
            ActivationDefaults {
                worker_name: self.config.default_worker_name.to_string(),
                job_timeout: self.config.default_job_timeout,
            },
        )
    }

    pub fn new_complete_job_command(&self) -> CompleteJobCommandStep1 {
        CompleteJobCommandStep1::new(self.dispatcher.clone())
    }

    pub fn new_fail_job_command(&self) -> FailJobCommandStep1 {
        FailJobCommandStep1::new(self.dispatcher.clone())
    }

    pub fn new_update_job_retries_command(&self) -> UpdateJobRetriesCommandStep1 {
        UpdateJobRetriesCommandStep1::new(self.dispatcher.clone())
    }

    /// Close the client and release the connection.
    ///
    /// Dispatches in flight fail with [`crate::ZbcError::Closed`] and open
    /// activation streams end with it. Calling this again is a no-op.
    pub async fn close(&self) {
        self.dispatcher.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.dispatcher.is_closed()
    }
}
