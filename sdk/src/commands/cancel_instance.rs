//! Cancel a running workflow instance

use super::{dispatch_unary, require_key, Command};
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;
use zbc_core::protocol::gateway_protocol::{
    CancelWorkflowInstanceRequest, CancelWorkflowInstanceResponse,
};
use zbc_core::{DispatchOptions, Dispatcher};

pub struct CancelInstanceCommandStep1 {
    dispatcher: Arc<Dispatcher>,
}

impl CancelInstanceCommandStep1 {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn workflow_instance_key(self, key: i64) -> CancelInstanceCommand {
        CancelInstanceCommand {
            dispatcher: self.dispatcher,
            workflow_instance_key: key,
            options: DispatchOptions::new(),
        }
    }
}

pub struct CancelInstanceCommand {
    dispatcher: Arc<Dispatcher>,
    workflow_instance_key: i64,
    options: DispatchOptions,
}

impl CancelInstanceCommand {
    /// Override the client's request timeout for this dispatch
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_request_timeout(timeout);
        self
    }

    pub fn command(&self) -> Result<Command> {
        require_key("workflow instance key", self.workflow_instance_key)?;
        Ok(Command::CancelInstance(CancelWorkflowInstanceRequest {
            workflow_instance_key: self.workflow_instance_key,
        }))
    }

    pub async fn send(self) -> Result<()> {
        let command = self.command()?;
        let _: CancelWorkflowInstanceResponse =
            dispatch_unary(&self.dispatcher, command, self.options).await?;
        Ok(())
    }
}
